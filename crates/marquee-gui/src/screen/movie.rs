use iced::widget::{button, column, container, row, text};
use iced::{Alignment, Element, Length, Task};

use marquee_api::types::{MovieDetails, MovieSummary};
use marquee_api::RecClient;
use marquee_core::rows::{RowDescriptor, RowKind, RowSet};

use crate::app;
use crate::screen::Action;
use crate::style;
use crate::theme::{self, ColorScheme};
use crate::widgets;

/// Movie detail screen: a header block plus a related-movies row.
pub struct MovieScreen {
    details: Option<MovieDetails>,
    rows: RowSet,
}

#[derive(Debug, Clone)]
pub enum Message {
    BackPressed,
    DetailsLoaded(Result<MovieDetails, String>),
    FeedLoaded {
        row: usize,
        generation: u64,
        result: Result<Vec<MovieSummary>, String>,
    },
    CardOpened(u32),
    RaterOpened(u32),
    ExternalLinkOpened(String),
}

impl MovieScreen {
    pub fn new() -> Self {
        Self {
            details: None,
            rows: RowSet::default(),
        }
    }

    /// Load a movie: one details fetch plus the related-movies row. Both
    /// are fetch-once, render-once — there is no retry.
    pub fn open(
        &mut self,
        movie_id: u32,
        client: &RecClient,
        model: &str,
        size: u32,
    ) -> Task<app::Message> {
        self.details = None;

        let details_client = client.clone();
        let details_task = Task::perform(
            async move {
                details_client
                    .movie(movie_id)
                    .await
                    .map_err(|e| e.to_string())
            },
            |result| app::Message::Movie(Message::DetailsLoaded(result)),
        );

        let fetches = self.rows.reset(vec![RowDescriptor {
            kind: RowKind::Similar { movie_id },
            label: "Related Movies".into(),
            size,
        }]);

        let model = model.to_string();
        let row_tasks: Vec<Task<app::Message>> = fetches
            .into_iter()
            .filter_map(|fetch| {
                let RowKind::Similar { movie_id } = fetch.kind else {
                    return None;
                };
                let client = client.clone();
                let model = model.clone();
                let (row, generation, size) = (fetch.row, fetch.generation, fetch.size);
                Some(Task::perform(
                    async move {
                        client
                            .similar_movies(movie_id, size, &model)
                            .await
                            .map_err(|e| e.to_string())
                    },
                    move |result| {
                        app::Message::Movie(Message::FeedLoaded {
                            row,
                            generation,
                            result,
                        })
                    },
                ))
            })
            .collect();

        Task::batch([details_task, Task::batch(row_tasks)])
    }

    pub fn update(&mut self, msg: Message) -> Action {
        match msg {
            Message::BackPressed => Action::GoHome,
            Message::DetailsLoaded(result) => {
                match result {
                    Ok(details) => self.details = Some(details),
                    // The header degrades to its loading placeholder; the
                    // related row is independent and unaffected.
                    Err(e) => tracing::debug!("movie details fetch failed: {e}"),
                }
                Action::None
            }
            Message::FeedLoaded {
                row,
                generation,
                result,
            } => {
                self.rows.feed_done(row, generation, result);
                Action::None
            }
            Message::CardOpened(movie_id) => Action::OpenMovie(movie_id),
            Message::RaterOpened(user_id) => Action::OpenUser(user_id),
            Message::ExternalLinkOpened(url) => {
                if let Err(e) = open::that_detached(&url) {
                    tracing::warn!("could not open {url}: {e}");
                }
                Action::None
            }
        }
    }

    pub fn view<'a>(&'a self, cs: &'a ColorScheme) -> Element<'a, Message> {
        let back = button(
            row![
                lucide_icons::iced::icon_arrow_left()
                    .size(style::TEXT_SM)
                    .center(),
                text("Back to browse")
                    .size(style::TEXT_SM)
                    .line_height(style::LINE_HEIGHT_NORMAL),
            ]
            .spacing(style::SPACE_XS)
            .align_y(Alignment::Center),
        )
        .padding([style::SPACE_SM, style::SPACE_MD])
        .on_press(Message::BackPressed)
        .style(theme::ghost_button(cs));

        let header: Element<'a, Message> = match &self.details {
            Some(details) => movie_header(cs, details),
            None => container(
                text("Loading...")
                    .size(style::TEXT_SM)
                    .color(cs.on_surface_variant)
                    .line_height(style::LINE_HEIGHT_LOOSE),
            )
            .padding(style::SPACE_2XL)
            .into(),
        };

        let sections: Vec<Element<'a, Message>> = self
            .rows
            .rows()
            .iter()
            .map(|r| widgets::row_section(cs, r, Message::CardOpened))
            .collect();

        widgets::page_scroller(
            column![back, header, column(sections).spacing(style::SPACE_XL)]
            .spacing(style::SPACE_LG)
            .padding([style::SPACE_LG, style::SPACE_XL]),
            cs,
        )
        .height(Length::Fill)
        .into()
    }
}

/// The detail header: poster placeholder plus the movie's headline facts.
fn movie_header<'a>(cs: &'a ColorScheme, details: &'a MovieDetails) -> Element<'a, Message> {
    let movie = &details.summary;

    let poster = container(
        text(movie.title.chars().next().unwrap_or('?').to_string())
            .size(style::TEXT_2XL)
            .color(cs.outline),
    )
    .style(theme::poster_placeholder(cs))
    .center_x(Length::Fixed(style::HEADER_POSTER_WIDTH))
    .center_y(Length::Fixed(style::HEADER_POSTER_HEIGHT));

    let links = row![
        button(text("IMDb").size(style::TEXT_SM))
            .padding(0)
            .on_press(Message::ExternalLinkOpened(format!(
                "https://www.imdb.com/title/tt{}",
                details.imdb_id
            )))
            .style(theme::link_button(cs)),
        button(text("TMDB").size(style::TEXT_SM))
            .padding(0)
            .on_press(Message::ExternalLinkOpened(format!(
                "https://www.themoviedb.org/movie/{}",
                details.tmdb_id
            )))
            .style(theme::link_button(cs)),
    ]
    .spacing(style::SPACE_MD);

    let raters: Vec<Element<'a, Message>> = details
        .top_ratings
        .iter()
        .map(|record| {
            let user_id = record.rating.user_id;
            button(text(format!("User{user_id}")).size(style::TEXT_SM))
                .padding(0)
                .on_press(Message::RaterOpened(user_id))
                .style(theme::link_button(cs))
                .into()
        })
        .collect();

    let mut facts = column![
        text(movie.title.as_str())
            .size(style::TEXT_XL)
            .color(cs.on_surface)
            .line_height(style::LINE_HEIGHT_TIGHT),
        text(format!(
            "{}  \u{00B7}  \u{2605} {:.1} average of {} ratings",
            movie.release_year, movie.average_rating, movie.rating_number
        ))
        .size(style::TEXT_SM)
        .color(cs.on_surface_variant)
        .line_height(style::LINE_HEIGHT_LOOSE),
        text(movie.genres.join(", "))
            .size(style::TEXT_SM)
            .color(cs.outline)
            .line_height(style::LINE_HEIGHT_LOOSE),
        links,
    ]
    .spacing(style::SPACE_SM);

    if !raters.is_empty() {
        facts = facts.push(
            column![
                text("Who likes it most")
                    .size(style::TEXT_XS)
                    .color(cs.outline)
                    .line_height(style::LINE_HEIGHT_LOOSE),
                row(raters).spacing(style::SPACE_SM),
            ]
            .spacing(style::SPACE_XXS),
        );
    }

    container(
        row![poster, facts]
            .spacing(style::SPACE_XL)
            .align_y(Alignment::Start),
    )
    .style(theme::card(cs))
    .padding(style::SPACE_XL)
    .width(Length::Fill)
    .into()
}
