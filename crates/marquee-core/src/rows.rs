//! Row-fetch bookkeeping for the browsing screens.
//!
//! A [`RowSet`] owns the rows of one screen. [`RowSet::begin`] starts a
//! fan-out cycle: it bumps the generation, clears every row, and hands the
//! shell one fetch per row to dispatch. Completions come back tagged with
//! the generation they belong to; anything stale — a slow response from
//! before a re-sort — is discarded so a cleared row is never repopulated
//! by old data.
//!
//! Rows are independent. A failed row stays empty and silent (debug log
//! only); it never blocks or hides its siblings, and only the
//! model-switch path talks to the notification center.

use marquee_api::types::{MovieDetails, MovieSummary, UserProfile};

/// What a row shows and where its data comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowKind {
    /// Top movies of one genre, ordered by the current sort key.
    Genre(String),
    /// Movies similar to one movie.
    Similar { movie_id: u32 },
    /// Personalized recommendations for one user.
    ForYou { user_id: u32 },
    /// Movies one user has rated; cards show the user's own score.
    History { user_id: u32 },
}

/// A logical collection to render.
#[derive(Debug, Clone)]
pub struct RowDescriptor {
    pub kind: RowKind,
    pub label: String,
    pub size: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowPhase {
    #[default]
    Loading,
    Ready,
    Failed,
}

/// One rendered card: the movie plus the rating the card displays.
#[derive(Debug, Clone)]
pub struct RowCard {
    pub movie: MovieSummary,
    pub shown_rating: f64,
}

#[derive(Debug)]
pub struct Row {
    pub descriptor: RowDescriptor,
    pub cards: Vec<RowCard>,
    pub phase: RowPhase,
}

/// A fetch the shell must dispatch for one row.
#[derive(Debug, Clone)]
pub struct RowFetch {
    pub row: usize,
    pub generation: u64,
    pub kind: RowKind,
    pub size: u32,
}

/// Second-level lookup for one history entry.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryFetch {
    pub row: usize,
    pub generation: u64,
    pub movie_id: u32,
    pub score: f32,
}

/// The rows of one screen, advanced by completion events.
#[derive(Debug, Default)]
pub struct RowSet {
    rows: Vec<Row>,
    generation: u64,
}

impl RowSet {
    pub fn new(descriptors: Vec<RowDescriptor>) -> Self {
        Self {
            rows: descriptors
                .into_iter()
                .map(|descriptor| Row {
                    descriptor,
                    cards: Vec::new(),
                    phase: RowPhase::default(),
                })
                .collect(),
            generation: 0,
        }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Replace the rows and start a fan-out cycle for the new set.
    ///
    /// The generation counter survives the swap, so a late response for
    /// the old rows can never land in the new ones.
    pub fn reset(&mut self, descriptors: Vec<RowDescriptor>) -> Vec<RowFetch> {
        self.rows = descriptors
            .into_iter()
            .map(|descriptor| Row {
                descriptor,
                cards: Vec::new(),
                phase: RowPhase::default(),
            })
            .collect();
        self.begin()
    }

    /// Start a new fan-out cycle: clear every row and return one fetch per
    /// row, all tagged with the new generation. The shell dispatches them
    /// without waiting on any.
    pub fn begin(&mut self) -> Vec<RowFetch> {
        self.generation += 1;
        for row in &mut self.rows {
            row.cards.clear();
            row.phase = RowPhase::Loading;
        }
        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| RowFetch {
                row: i,
                generation: self.generation,
                kind: row.descriptor.kind.clone(),
                size: row.descriptor.size,
            })
            .collect()
    }

    /// True when the completion belongs to the current cycle and row.
    fn accepts(&self, row: usize, generation: u64) -> bool {
        if generation != self.generation {
            tracing::trace!(row, generation, "discarding stale row completion");
            return false;
        }
        row < self.rows.len()
    }

    /// A single-level feed (genre / similar / for-you) resolved.
    ///
    /// Cards are appended in the order the server returned them.
    pub fn feed_done(
        &mut self,
        row: usize,
        generation: u64,
        result: Result<Vec<MovieSummary>, String>,
    ) {
        if !self.accepts(row, generation) {
            return;
        }
        let slot = &mut self.rows[row];
        match result {
            Ok(movies) => {
                slot.cards.extend(movies.into_iter().map(|movie| RowCard {
                    shown_rating: movie.average_rating,
                    movie,
                }));
                slot.phase = RowPhase::Ready;
            }
            Err(e) => {
                tracing::debug!(row, "row feed failed, leaving row empty: {e}");
                slot.phase = RowPhase::Failed;
            }
        }
    }

    /// First level of a history row resolved: the user profile.
    ///
    /// Returns one lookup per rating entry for the shell to fan out; the
    /// lookups are independent of each other and of every other row.
    pub fn user_done(
        &mut self,
        row: usize,
        generation: u64,
        result: Result<UserProfile, String>,
    ) -> Vec<HistoryFetch> {
        if !self.accepts(row, generation) {
            return Vec::new();
        }
        match result {
            Ok(profile) => {
                self.rows[row].phase = RowPhase::Ready;
                profile
                    .ratings
                    .iter()
                    .map(|record| HistoryFetch {
                        row,
                        generation,
                        movie_id: record.rating.movie_id,
                        score: record.rating.score,
                    })
                    .collect()
            }
            Err(e) => {
                tracing::debug!(row, "user history fetch failed, leaving row empty: {e}");
                self.rows[row].phase = RowPhase::Failed;
                Vec::new()
            }
        }
    }

    /// Second level of a history row: one movie lookup resolved. The card
    /// shows the user's own score rather than the catalog average.
    pub fn history_card_done(
        &mut self,
        row: usize,
        generation: u64,
        score: f32,
        result: Result<MovieDetails, String>,
    ) {
        if !self.accepts(row, generation) {
            return;
        }
        match result {
            Ok(details) => {
                self.rows[row].cards.push(RowCard {
                    movie: details.summary,
                    shown_rating: f64::from(score),
                });
            }
            Err(e) => {
                // One missing entry doesn't fail the row.
                tracing::debug!(row, "history entry lookup failed, skipping card: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_api::types::{Rating, RatingRecord};

    fn movie(id: u32, title: &str, rating: f64) -> MovieSummary {
        MovieSummary {
            movie_id: id,
            title: title.into(),
            release_year: 1999,
            average_rating: rating,
            rating_number: 100,
            genres: vec!["Drama".into()],
        }
    }

    fn details(id: u32, title: &str) -> MovieDetails {
        MovieDetails {
            summary: movie(id, title, 4.0),
            imdb_id: String::new(),
            tmdb_id: String::new(),
            top_ratings: Vec::new(),
        }
    }

    fn genre_rows(labels: &[&str]) -> RowSet {
        RowSet::new(
            labels
                .iter()
                .map(|label| RowDescriptor {
                    kind: RowKind::Genre((*label).into()),
                    label: (*label).into(),
                    size: 8,
                })
                .collect(),
        )
    }

    #[test]
    fn test_cards_preserve_server_order() {
        let mut rows = genre_rows(&["Action"]);
        let fetches = rows.begin();

        // Out of id/rating order on purpose.
        rows.feed_done(
            0,
            fetches[0].generation,
            Ok(vec![
                movie(3, "Third", 2.0),
                movie(1, "First", 5.0),
                movie(2, "Second", 3.5),
            ]),
        );

        let titles: Vec<&str> = rows.rows()[0]
            .cards
            .iter()
            .map(|c| c.movie.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Third", "First", "Second"]);
    }

    #[test]
    fn test_rows_are_independent_on_failure() {
        let mut rows = genre_rows(&["Action", "Romance"]);
        let fetches = rows.begin();
        let generation = fetches[0].generation;

        rows.feed_done(0, generation, Err("503 from upstream".into()));
        rows.feed_done(1, generation, Ok(vec![movie(7, "Casablanca", 4.5)]));

        assert_eq!(rows.rows()[0].phase, RowPhase::Failed);
        assert!(rows.rows()[0].cards.is_empty());
        assert_eq!(rows.rows()[1].phase, RowPhase::Ready);
        assert_eq!(rows.rows()[1].cards.len(), 1);
    }

    #[test]
    fn test_stale_generation_is_discarded() {
        let mut rows = genre_rows(&["Action"]);
        let first = rows.begin();
        let old_generation = first[0].generation;

        // Re-sort before the first response lands.
        let second = rows.begin();
        let new_generation = second[0].generation;

        rows.feed_done(0, old_generation, Ok(vec![movie(1, "Stale", 4.0)]));
        assert!(rows.rows()[0].cards.is_empty());
        assert_eq!(rows.rows()[0].phase, RowPhase::Loading);

        rows.feed_done(0, new_generation, Ok(vec![movie(2, "Fresh", 4.0)]));
        assert_eq!(rows.rows()[0].cards.len(), 1);
        assert_eq!(rows.rows()[0].cards[0].movie.title, "Fresh");
    }

    #[test]
    fn test_begin_clears_previous_cards() {
        let mut rows = genre_rows(&["Action"]);
        let fetches = rows.begin();
        rows.feed_done(0, fetches[0].generation, Ok(vec![movie(1, "Old", 4.0)]));
        assert_eq!(rows.rows()[0].cards.len(), 1);

        let fetches = rows.begin();
        assert!(rows.rows()[0].cards.is_empty());
        assert_eq!(rows.rows()[0].phase, RowPhase::Loading);
        assert_eq!(fetches.len(), 1);
    }

    #[test]
    fn test_history_fans_out_one_lookup_per_entry() {
        let mut rows = RowSet::new(vec![RowDescriptor {
            kind: RowKind::History { user_id: 42 },
            label: "User Watched Movies".into(),
            size: 0,
        }]);
        let fetches = rows.begin();
        let generation = fetches[0].generation;

        let profile = UserProfile {
            user_id: 42,
            rating_count: 2,
            average_rating: 3.0,
            highest_rating: 4.5,
            lowest_rating: 1.5,
            ratings: vec![
                RatingRecord {
                    rating: Rating {
                        movie_id: 10,
                        user_id: 42,
                        score: 4.5,
                    },
                },
                RatingRecord {
                    rating: Rating {
                        movie_id: 20,
                        user_id: 42,
                        score: 1.5,
                    },
                },
            ],
        };

        let lookups = rows.user_done(0, generation, Ok(profile));
        assert_eq!(
            lookups,
            vec![
                HistoryFetch {
                    row: 0,
                    generation,
                    movie_id: 10,
                    score: 4.5
                },
                HistoryFetch {
                    row: 0,
                    generation,
                    movie_id: 20,
                    score: 1.5
                },
            ]
        );

        // Cards show the user's score, not the catalog average.
        rows.history_card_done(0, generation, 4.5, Ok(details(10, "Heat")));
        assert!((rows.rows()[0].cards[0].shown_rating - 4.5).abs() < 1e-9);

        // A failed entry lookup is skipped without failing the row.
        rows.history_card_done(0, generation, 1.5, Err("404".into()));
        assert_eq!(rows.rows()[0].cards.len(), 1);
        assert_eq!(rows.rows()[0].phase, RowPhase::Ready);
    }

    #[test]
    fn test_reset_keeps_generation_monotonic() {
        let mut rows = genre_rows(&["Action"]);
        let first = rows.begin();
        let old_generation = first[0].generation;

        // Swapping descriptors (a different screen target) must not let
        // the old rows' responses land in the new ones.
        let fetches = rows.reset(vec![RowDescriptor {
            kind: RowKind::Similar { movie_id: 99 },
            label: "Related Movies".into(),
            size: 16,
        }]);
        assert!(fetches[0].generation > old_generation);

        rows.feed_done(0, old_generation, Ok(vec![movie(1, "Stale", 4.0)]));
        assert!(rows.rows()[0].cards.is_empty());
    }

    #[test]
    fn test_stale_history_lookup_is_discarded() {
        let mut rows = RowSet::new(vec![RowDescriptor {
            kind: RowKind::History { user_id: 42 },
            label: "User Watched Movies".into(),
            size: 0,
        }]);
        let first = rows.begin();
        let old_generation = first[0].generation;
        rows.begin();

        rows.history_card_done(0, old_generation, 5.0, Ok(details(10, "Stale")));
        assert!(rows.rows()[0].cards.is_empty());
    }
}
