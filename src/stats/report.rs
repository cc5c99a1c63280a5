// The text report printed at the end of a run.

use crate::stats::*;

const SECTION_GAP: usize = 3;

pub fn build_report(analysis: &Analysis, rules: &AnalysisRules) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!(
        "MAPPER RATING OF TOP {} MAPPERS BY MAP COUNT",
        rules.top_n
    ));
    for entry in analysis.rating_of_top_mappers.iter() {
        match &entry.rating {
            Ok(rating) => lines.push(format!("{} {:.3}", entry.author, rating)),
            Err(_) => lines.push(format!(
                "{} no rating (fewer than {} maps, or no map with {}+ votes)",
                entry.author, rules.min_maps_per_author, rules.min_votes_per_map
            )),
        }
    }

    push_gap(&mut lines);
    lines.push(format!(
        "MAP COUNT OF TOP {} MAPPERS BY MAP RATING",
        rules.top_n
    ));
    for entry in analysis.count_of_top_rated_mappers.iter() {
        lines.push(format!("{} {}", entry.author, entry.count));
    }

    push_gap(&mut lines);
    lines.push(format!("WORST MAP WITH {}+ VOTES", rules.min_votes_per_map));
    lines.extend(extreme_maps_lines(&analysis.worst_maps));

    push_gap(&mut lines);
    lines.push(format!("BEST MAP WITH {}+ VOTES", rules.min_votes_per_map));
    lines.extend(extreme_maps_lines(&analysis.best_maps));

    lines
}

pub fn print_report(lines: &[String]) {
    for line in lines.iter() {
        println!("{}", line);
    }
}

fn push_gap(lines: &mut Vec<String>) {
    for _ in 0..SECTION_GAP {
        lines.push(String::new());
    }
}

/// A two-column table of map names and authors, right-aligned like a spreadsheet dump.
fn extreme_maps_lines(em: &Result<ExtremeMaps, AnalysisErrors>) -> Vec<String> {
    let em = match em {
        Ok(em) => em,
        Err(e) => return vec![format!("No map: {}", e)],
    };
    let rows: Vec<(&str, &str)> = em
        .maps
        .iter()
        .map(|m| {
            (
                m.name.as_deref().unwrap_or("?"),
                m.author.as_deref().unwrap_or("?"),
            )
        })
        .collect();
    let name_width = rows
        .iter()
        .map(|(n, _)| n.chars().count())
        .chain(std::iter::once("name".len()))
        .max()
        .unwrap_or(0);
    let author_width = rows
        .iter()
        .map(|(_, a)| a.chars().count())
        .chain(std::iter::once("author_nickname".len()))
        .max()
        .unwrap_or(0);

    let mut res = vec![format!(
        "{:>nw$} {:>aw$}",
        "name",
        "author_nickname",
        nw = name_width,
        aw = author_width
    )];
    for (name, author) in rows {
        res.push(format!(
            "{:>nw$} {:>aw$}",
            name,
            author,
            nw = name_width,
            aw = author_width
        ));
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis() -> Analysis {
        let mut builder = Builder::new(&AnalysisRules::default()).unwrap();
        for idx in 0..5 {
            builder
                .add_map_simple(&format!("Map {}", idx), "a-1", "Anna", 0.2, 5)
                .unwrap();
        }
        builder.add_map_simple("Lone", "b-2", "Bo", -0.4, 9).unwrap();
        builder.analyze().unwrap()
    }

    #[test]
    fn sections() {
        let lines = build_report(&analysis(), &AnalysisRules::default());
        assert_eq!(lines[0], "MAPPER RATING OF TOP 10 MAPPERS BY MAP COUNT");
        assert_eq!(lines[1], "Anna 6.000");
        assert!(lines[2].starts_with("Bo no rating"));
        assert_eq!(&lines[3..6], &["", "", ""]);
        assert_eq!(lines[6], "MAP COUNT OF TOP 10 MAPPERS BY MAP RATING");
        assert_eq!(lines[7], "Anna 5");
        assert_eq!(lines[11], "WORST MAP WITH 5+ VOTES");
        assert_eq!(lines[12], "name author_nickname");
        assert_eq!(lines[13], "Lone              Bo");
        assert_eq!(lines[17], "BEST MAP WITH 5+ VOTES");
        assert_eq!(lines.len(), 24);
    }

    #[test]
    fn empty_extremes() {
        let em: Result<ExtremeMaps, AnalysisErrors> = Err(AnalysisErrors::EmptyResult {
            what: "worst maps".to_string(),
        });
        let lines = extreme_maps_lines(&em);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("No map"));
    }
}
