fn pick(options: &[&'static str], index: usize) -> &'static str {
    options[index]
}

fn main() {
    tryme::global().set_catch_action(|fault| {
        println!("attempt failed, {}", fault.message());
    });

    let options = ["Success!"];

    let y = tryme::attempt(|| pick(&options, 0));
    println!("{y:?}");

    let y = tryme::attempt(|| pick(&options, 1));
    println!("{y:?}");

    let y = tryme::attempt_or("fail", || pick(&options, 1));
    println!("{y}");
}
