use iced::widget::column;
use iced::{Element, Length, Task};

use marquee_api::types::{MovieSummary, SortKey};
use marquee_api::RecClient;
use marquee_core::config::AppConfig;
use marquee_core::rows::{RowDescriptor, RowKind, RowSet};

use crate::app;
use crate::screen::Action;
use crate::style;
use crate::theme::ColorScheme;
use crate::widgets;

/// Browse screen: one independently-loading row per configured genre.
pub struct Home {
    rows: RowSet,
}

#[derive(Debug, Clone)]
pub enum Message {
    FeedLoaded {
        row: usize,
        generation: u64,
        result: Result<Vec<MovieSummary>, String>,
    },
    CardOpened(u32),
}

impl Home {
    pub fn new(config: &AppConfig) -> Self {
        let descriptors = config
            .home
            .genres
            .iter()
            .map(|genre| RowDescriptor {
                kind: RowKind::Genre(genre.clone()),
                label: genre.clone(),
                size: config.home.row_size,
            })
            .collect();
        Self {
            rows: RowSet::new(descriptors),
        }
    }

    /// Clear every row and fan out one fetch per genre under the given
    /// sort key. All fetches are dispatched at once; each row renders on
    /// its own response, in whatever order responses arrive.
    pub fn reload(&mut self, client: &RecClient, sort: SortKey) -> Task<app::Message> {
        let fetches = self.rows.begin();
        let tasks: Vec<Task<app::Message>> = fetches
            .into_iter()
            .filter_map(|fetch| {
                let RowKind::Genre(genre) = fetch.kind else {
                    return None;
                };
                let client = client.clone();
                let (row, generation, size) = (fetch.row, fetch.generation, fetch.size);
                Some(Task::perform(
                    async move {
                        client
                            .genre_feed(&genre, size, sort)
                            .await
                            .map_err(|e| e.to_string())
                    },
                    move |result| {
                        app::Message::Home(Message::FeedLoaded {
                            row,
                            generation,
                            result,
                        })
                    },
                ))
            })
            .collect();
        Task::batch(tasks)
    }

    pub fn update(&mut self, msg: Message) -> Action {
        match msg {
            Message::FeedLoaded {
                row,
                generation,
                result,
            } => {
                self.rows.feed_done(row, generation, result);
                Action::None
            }
            Message::CardOpened(movie_id) => Action::OpenMovie(movie_id),
        }
    }

    pub fn view<'a>(&'a self, cs: &'a ColorScheme) -> Element<'a, Message> {
        let sections: Vec<Element<'a, Message>> = self
            .rows
            .rows()
            .iter()
            .map(|row| widgets::row_section(cs, row, Message::CardOpened))
            .collect();

        widgets::page_scroller(
            column(sections)
                .spacing(style::SPACE_XL)
                .padding([style::SPACE_LG, style::SPACE_XL]),
            cs,
        )
        .height(Length::Fill)
        .into()
    }
}
