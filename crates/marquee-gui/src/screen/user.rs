use iced::widget::{button, column, container, row, text};
use iced::{Alignment, Element, Length, Task};

use marquee_api::types::{MovieDetails, MovieSummary, UserProfile};
use marquee_api::RecClient;
use marquee_core::rows::{RowDescriptor, RowKind, RowSet};

use crate::app;
use crate::screen::Action;
use crate::style;
use crate::theme::{self, ColorScheme};
use crate::widgets;

/// User detail screen: a stats header, the for-you row, and the watch
/// history row.
pub struct UserScreen {
    profile: Option<UserProfile>,
    rows: RowSet,
}

#[derive(Debug, Clone)]
pub enum Message {
    BackPressed,
    DetailsLoaded(Result<UserProfile, String>),
    FeedLoaded {
        row: usize,
        generation: u64,
        result: Result<Vec<MovieSummary>, String>,
    },
    HistoryLoaded {
        row: usize,
        generation: u64,
        result: Result<UserProfile, String>,
    },
    HistoryCardLoaded {
        row: usize,
        generation: u64,
        score: f32,
        result: Result<MovieDetails, String>,
    },
    CardOpened(u32),
}

impl UserScreen {
    pub fn new() -> Self {
        Self {
            profile: None,
            rows: RowSet::default(),
        }
    }

    /// Load a user: one details fetch for the header, plus the for-you
    /// row and the two-level watch-history row.
    pub fn open(
        &mut self,
        user_id: u32,
        client: &RecClient,
        model: &str,
        for_you_size: u32,
    ) -> Task<app::Message> {
        self.profile = None;

        let details_client = client.clone();
        let details_task = Task::perform(
            async move { details_client.user(user_id).await.map_err(|e| e.to_string()) },
            |result| app::Message::User(Message::DetailsLoaded(result)),
        );

        let fetches = self.rows.reset(vec![
            RowDescriptor {
                kind: RowKind::ForYou { user_id },
                label: "Recommended For You".into(),
                size: for_you_size,
            },
            RowDescriptor {
                kind: RowKind::History { user_id },
                label: "User Watched Movies".into(),
                size: 0,
            },
        ]);

        let model = model.to_string();
        let row_tasks: Vec<Task<app::Message>> = fetches
            .into_iter()
            .map(|fetch| {
                let client = client.clone();
                let (row, generation, size) = (fetch.row, fetch.generation, fetch.size);
                match fetch.kind {
                    RowKind::ForYou { user_id } => {
                        let model = model.clone();
                        Task::perform(
                            async move {
                                client
                                    .recommendations_for(user_id, size, &model)
                                    .await
                                    .map_err(|e| e.to_string())
                            },
                            move |result| {
                                app::Message::User(Message::FeedLoaded {
                                    row,
                                    generation,
                                    result,
                                })
                            },
                        )
                    }
                    RowKind::History { user_id } => Task::perform(
                        async move { client.user(user_id).await.map_err(|e| e.to_string()) },
                        move |result| {
                            app::Message::User(Message::HistoryLoaded {
                                row,
                                generation,
                                result,
                            })
                        },
                    ),
                    _ => Task::none(),
                }
            })
            .collect();

        Task::batch([details_task, Task::batch(row_tasks)])
    }

    pub fn update(&mut self, msg: Message, client: &RecClient) -> Action {
        match msg {
            Message::BackPressed => Action::GoHome,
            Message::DetailsLoaded(result) => {
                match result {
                    Ok(profile) => self.profile = Some(profile),
                    Err(e) => tracing::debug!("user details fetch failed: {e}"),
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
            Message::HistoryLoaded {
                row,
                generation,
                result,
            } => {
                // First level resolved: fan out one movie lookup per
                // rating entry, each independent of the others.
                let lookups = self.rows.user_done(row, generation, result);
                if lookups.is_empty() {
                    return Action::None;
                }
                let tasks: Vec<Task<app::Message>> = lookups
                    .into_iter()
                    .map(|lookup| {
                        let client = client.clone();
                        Task::perform(
                            async move {
                                client
                                    .movie(lookup.movie_id)
                                    .await
                                    .map_err(|e| e.to_string())
                            },
                            move |result| {
                                app::Message::User(Message::HistoryCardLoaded {
                                    row: lookup.row,
                                    generation: lookup.generation,
                                    score: lookup.score,
                                    result,
                                })
                            },
                        )
                    })
                    .collect();
                Action::RunTask(Task::batch(tasks))
            }
            Message::HistoryCardLoaded {
                row,
                generation,
                score,
                result,
            } => {
                self.rows.history_card_done(row, generation, score, result);
                Action::None
            }
            Message::CardOpened(movie_id) => Action::OpenMovie(movie_id),
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

        let header: Element<'a, Message> = match &self.profile {
            Some(profile) => user_header(cs, profile),
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

/// The detail header: avatar placeholder plus the user's aggregate stats.
fn user_header<'a>(cs: &'a ColorScheme, profile: &'a UserProfile) -> Element<'a, Message> {
    let avatar = container(
        text(format!("U{}", profile.user_id % 10))
            .size(style::TEXT_2XL)
            .color(cs.outline),
    )
    .style(theme::poster_placeholder(cs))
    .center_x(Length::Fixed(style::HEADER_POSTER_WIDTH))
    .center_y(Length::Fixed(style::HEADER_POSTER_WIDTH));

    let stat = |label: &'static str, value: String| {
        column![
            text(label)
                .size(style::TEXT_XS)
                .color(cs.outline)
                .line_height(style::LINE_HEIGHT_LOOSE),
            text(value)
                .size(style::TEXT_BASE)
                .color(cs.on_surface)
                .line_height(style::LINE_HEIGHT_NORMAL),
        ]
        .spacing(style::SPACE_XXS)
    };

    let facts = column![
        text(format!("User{}", profile.user_id))
            .size(style::TEXT_XL)
            .color(cs.on_surface)
            .line_height(style::LINE_HEIGHT_TIGHT),
        row![
            stat("Watched movies", profile.rating_count.to_string()),
            stat(
                "Average score",
                format!("\u{2605} {:.1}", profile.average_rating)
            ),
            stat("Highest", format!("{:.1}", profile.highest_rating)),
            stat("Lowest", format!("{:.1}", profile.lowest_rating)),
        ]
        .spacing(style::SPACE_2XL),
    ]
    .spacing(style::SPACE_LG);

    container(
        row![avatar, facts]
            .spacing(style::SPACE_XL)
            .align_y(Alignment::Start),
    )
    .style(theme::card(cs))
    .padding(style::SPACE_XL)
    .width(Length::Fill)
    .into()
}
