use tickmark_core::{Event, Tokenizer};

fn main() {
    let chunks = ["Run `car", "go test` then:\n``", "`sh\nmake\n`", "``\ndone"];

    println!("Chunks: {:?}\n", chunks);
    println!("Events:");

    let mut tokenizer = Tokenizer::new();
    let mut sink = |event: Event<'_>| match event {
        Event::Text { style, text } => println!("  {:<12} {:?}", style, text),
        Event::End { style } => println!("  {:<12} <end>", style),
    };

    for chunk in chunks {
        println!("-- push {:?}", chunk);
        tokenizer.push_chunk(chunk, &mut sink);
    }
    println!("-- finish");
    tokenizer.finish(&mut sink);
}
