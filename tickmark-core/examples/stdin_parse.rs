use std::io::Read;
use tickmark_core::{Event, Tokenizer};

fn main() -> std::io::Result<()> {
    let mut tokenizer = Tokenizer::new();
    let mut sink = |event: Event<'_>| eprintln!("EVENT: {:?}", event);

    let mut stdin = std::io::stdin().lock();
    let mut buf = [0u8; 64];
    loop {
        let n = stdin.read(&mut buf)?;
        if n == 0 {
            break;
        }
        tokenizer.push_bytes(&buf[..n], &mut sink);
    }
    tokenizer.finish(&mut sink);
    Ok(())
}
