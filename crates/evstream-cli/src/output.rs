use is_terminal::IsTerminal;
use owo_colors::OwoColorize;

/// One line per completed stage; green when a human is watching.
pub fn success(message: &str) {
    if std::io::stdout().is_terminal() {
        println!("{}", message.green());
    } else {
        println!("{}", message);
    }
}
