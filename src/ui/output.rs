use crate::movie::MovieId;
use crate::output::is_quiet;
use crate::ui::theme::Role;
use crate::ui::{theme, Icons};

pub fn header(text: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", Icons::FILM, theme().paint(Role::Title, text));
}

pub fn status(icon: &str, label: &str, value: &str) {
    println!("{} {}: {}", icon, theme().paint(Role::Label, label), value);
}

pub fn success(label: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", Icons::CHECK, theme().paint(Role::Ok, label));
}

pub fn error(label: &str) {
    eprintln!("{} {}", Icons::CROSS, theme().paint(Role::Failure, label));
}

pub fn warn(label: &str) {
    eprintln!("{} {}", Icons::WARN, theme().paint(Role::Caution, label));
}

pub fn info(label: &str, value: &str) {
    if is_quiet() {
        return;
    }
    println!(
        "{} {}: {}",
        theme().paint(Role::Note, Icons::INFO),
        theme().paint(Role::Label, label),
        value
    );
}

pub fn dim(text: &str) -> String {
    theme().paint(Role::Label, text)
}

pub fn muted(text: &str) -> String {
    theme().paint(Role::Faint, text)
}

/// Report a finished save, marking whether the movie is new
pub fn movie_saved(id: MovieId, created: bool) {
    let (icon, verb) = if created { (Icons::NEW, "Added") } else { (Icons::MOD, "Updated") };
    println!(
        "{} {} movie {}",
        theme().paint(Role::Ok, icon),
        verb,
        theme().paint(Role::MovieId, format_args!("#{}", id))
    );
}

pub fn movie_deleted(id: MovieId) {
    println!(
        "{} Deleted movie {}",
        theme().paint(Role::Failure, Icons::DEL),
        theme().paint(Role::MovieId, format_args!("#{}", id))
    );
}

pub fn summary_row(label: &str, value: &str) {
    println!("  {} {}", theme().paint(Role::Label, label), value);
}
