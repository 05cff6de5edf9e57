use crate::affiliation::Affiliations;
use crate::openreview::Note;

/// Separator between authors (and list items) inside one CSV cell
pub const AUTHOR_SEPARATOR: &str = "; ";

pub const HEADER: [&str; 7] = [
    "PaperID",
    "Title",
    "Authors",
    "Affiliations",
    "Positions",
    "Keywords",
    "Venue",
];

/// One CSV row per submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub paper_id: String,
    pub title: String,
    pub authors: String,
    pub affiliations: String,
    pub positions: String,
    pub keywords: String,
    pub venue: String,
}

impl ReportRow {
    /// Build a row from a submission and its authors' resolved affiliations,
    /// given in author-id order
    pub fn from_note(note: &Note, authors: &[Affiliations]) -> Self {
        let affiliations = authors
            .iter()
            .map(Affiliations::institutions_field)
            .collect::<Vec<_>>()
            .join(AUTHOR_SEPARATOR);
        let positions = authors
            .iter()
            .map(Affiliations::positions_field)
            .collect::<Vec<_>>()
            .join(AUTHOR_SEPARATOR);

        Self {
            paper_id: note.forum_id().to_string(),
            title: note.title().to_string(),
            authors: note.authors().join(AUTHOR_SEPARATOR),
            affiliations,
            positions,
            keywords: note.keywords().join(AUTHOR_SEPARATOR),
            venue: note.venue_label().to_string(),
        }
    }

    pub fn fields(&self) -> [&str; 7] {
        [
            &self.paper_id,
            &self.title,
            &self.authors,
            &self.affiliations,
            &self.positions,
            &self.keywords,
            &self.venue,
        ]
    }
}
