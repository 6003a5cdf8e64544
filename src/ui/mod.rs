pub mod icons;
pub mod output;
pub mod progress;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{
    dim, error, header, info, movie_deleted, movie_saved, muted, status, success,
    summary_row, warn,
};
pub use progress::Spinner;
pub use table::{detail_table, movie_table, stats_table};
pub use theme::{theme, Role, Theme};
