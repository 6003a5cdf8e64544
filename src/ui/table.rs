use crate::movie::{MovieRecord, MovieSummary};
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct ListRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
}

#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "Field")]
    field: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Tabled)]
struct MetricRow {
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Value")]
    value: String,
}

/// The movie list, one row per movie in the order given
pub fn movie_table(movies: &[MovieSummary]) -> String {
    if movies.is_empty() {
        return String::new();
    }

    let rows: Vec<ListRow> = movies
        .iter()
        .map(|m| ListRow { id: m.id.get(), name: m.name.clone() })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Every field of one movie, empty fields included
pub fn detail_table(record: &MovieRecord) -> String {
    let mut rows = vec![FieldRow { field: "ID", value: record.id.to_string() }];
    rows.extend(record.movie.fields().into_iter().map(|(field, value)| FieldRow {
        field,
        value: value.to_string(),
    }));

    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn stats_table(stats: &[(&str, &str)]) -> String {
    if stats.is_empty() {
        return String::new();
    }

    let rows: Vec<MetricRow> = stats
        .iter()
        .map(|(label, value)| MetricRow { metric: label.to_string(), value: value.to_string() })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movie::{Movie, MovieId};

    #[test]
    fn test_empty_list_renders_nothing() {
        assert!(movie_table(&[]).is_empty());
    }

    #[test]
    fn test_movie_table_keeps_order() {
        let movies = vec![
            MovieSummary { id: MovieId::new(2), name: "Alpha".to_string() },
            MovieSummary { id: MovieId::new(1), name: "Zeta".to_string() },
        ];
        let table = movie_table(&movies);
        let alpha = table.find("Alpha").unwrap();
        let zeta = table.find("Zeta").unwrap();
        assert!(alpha < zeta);
    }

    #[test]
    fn test_detail_table_lists_every_field() {
        let record = MovieRecord {
            id: MovieId::new(1),
            movie: Movie::named("Inception").with_director("Nolan"),
        };
        let table = detail_table(&record);
        for label in ["ID", "Name", "Director", "Writer", "Actor", "Actress", "Genre", "Year"] {
            assert!(table.contains(label), "missing {label}");
        }
        assert!(table.contains("Nolan"));
    }
}
