// src/genres.rs

/// One row of the genre table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreEntry {
    pub id: u32,
    pub title: &'static str,
}

/// The table the catalog API indexes its numeric genre IDs into.
const BUILTIN_GENRES: [GenreEntry; 9] = [
    GenreEntry { id: 1, title: "Personal Growth" },
    GenreEntry { id: 2, title: "Investigative Journalism" },
    GenreEntry { id: 3, title: "History" },
    GenreEntry { id: 4, title: "Comedy" },
    GenreEntry { id: 5, title: "Entertainment" },
    GenreEntry { id: 6, title: "Business" },
    GenreEntry { id: 7, title: "Fiction" },
    GenreEntry { id: 8, title: "News" },
    GenreEntry { id: 9, title: "Kids and Family" },
];

/// Maps numeric genre IDs to display names. The table is injected at
/// construction so tests can swap in an alternate one.
#[derive(Debug, Clone)]
pub struct GenreResolver {
    table: Vec<GenreEntry>,
}

impl Default for GenreResolver {
    fn default() -> Self {
        Self { table: BUILTIN_GENRES.to_vec() }
    }
}

impl GenreResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(table: Vec<GenreEntry>) -> Self {
        Self { table }
    }

    /// Resolves each ID against the table, preserving input order.
    /// Unmatched IDs are dropped; the result may be shorter than the input.
    pub fn resolve(&self, ids: &[u32]) -> Vec<&str> {
        ids.iter()
            .filter_map(|id| self.table.iter().find(|genre| genre.id == *id))
            .map(|genre| genre.title)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_ids_in_order() {
        let resolver = GenreResolver::new();
        let names = resolver.resolve(&[3, 1, 9]);
        assert_eq!(names, vec!["History", "Personal Growth", "Kids and Family"]);
    }

    #[test]
    fn preserves_length_for_all_valid_ids() {
        let resolver = GenreResolver::new();
        let ids: Vec<u32> = (1..=9).collect();
        assert_eq!(resolver.resolve(&ids).len(), ids.len());
    }

    #[test]
    fn drops_unknown_ids_silently() {
        let resolver = GenreResolver::new();
        let names = resolver.resolve(&[4, 42, 8, 0]);
        assert_eq!(names, vec!["Comedy", "News"]);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let resolver = GenreResolver::new();
        assert!(resolver.resolve(&[]).is_empty());
    }

    #[test]
    fn honors_an_injected_table() {
        let resolver = GenreResolver::with_table(vec![
            GenreEntry { id: 100, title: "Field Recordings" },
        ]);
        assert_eq!(resolver.resolve(&[100, 1]), vec!["Field Recordings"]);
    }
}
