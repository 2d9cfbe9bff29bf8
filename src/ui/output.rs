use owo_colors::OwoColorize;

pub fn header(text: &str) {
    println!("{}", text.bold());
}

pub fn success(label: &str) {
    println!("{} {}", "✔".green(), label);
}

pub fn error(label: &str) {
    eprintln!("{} {}", "✘".red(), label);
}

pub fn warn(label: &str) {
    eprintln!("{} {}", "⚠".yellow(), label);
}

pub fn info(label: &str, value: &str) {
    println!("{} {}: {}", "ℹ".cyan(), label.dimmed(), value);
}
