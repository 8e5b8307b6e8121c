use std::time::Instant;

use iced::widget::{button, column, container, pick_list, row, stack, text};
use iced::{Alignment, Element, Length, Subscription, Task};

use marquee_api::types::{ModelCatalog, ModelEntry, SortKey, SwitchOutcome};
use marquee_api::RecClient;
use marquee_core::config::AppConfig;
use marquee_core::notify::NotificationCenter;
use marquee_core::picker::{ModelPicker, PickerCmd, PickerPhase};
use marquee_core::sort::SortStore;
use url::Url;

use crate::screen::{home, movie, user, Action, Page};
use crate::style;
use crate::subscription;
use crate::theme::{self, ColorScheme, MarqueeTheme, ThemeMode};
use crate::toast;

/// Everything `main` resolves before the UI starts.
#[derive(Debug, Clone)]
pub struct Flags {
    pub config: AppConfig,
    pub base_url: Url,
    pub user_id: u32,
}

/// Application state — slim router that delegates to screens.
pub struct Marquee {
    page: Page,
    config: AppConfig,
    client: RecClient,
    user_id: u32,
    // Sort
    sort_store: SortStore,
    sort: SortKey,
    // Model control & notifications
    picker: ModelPicker,
    notices: NotificationCenter,
    // Screens
    home: home::Home,
    movie: movie::MovieScreen,
    user: user::UserScreen,
    // Theme
    current_theme: MarqueeTheme,
    active_mode: ThemeMode,
}

/// All messages the application can handle.
#[derive(Debug, Clone)]
pub enum Message {
    Tick,
    DismissNotice(u64),
    SortPicked(SortKey),
    ModelPicked(ModelChoice),
    CatalogLoaded(Result<ModelCatalog, String>),
    SwitchResolved(Result<SwitchOutcome, String>),
    SettleElapsed,
    GoHome,
    OpenMovie(u32),
    OpenUser(u32),
    Home(home::Message),
    Movie(movie::Message),
    User(user::Message),
}

/// Entry shown in the model selector dropdown.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelChoice {
    version: String,
    label: String,
}

impl ModelChoice {
    fn from_entry(entry: &ModelEntry) -> Self {
        Self {
            version: entry.version.clone(),
            label: entry.display_name.clone(),
        }
    }
}

impl std::fmt::Display for ModelChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label)
    }
}

impl Marquee {
    pub fn new(flags: Flags) -> (Self, Task<Message>) {
        let sort_store = SortStore::default_location();
        let sort = sort_store.get();
        let home = home::Home::new(&flags.config);

        let mut app = Self {
            page: Page::default(),
            client: RecClient::new(flags.base_url),
            user_id: flags.user_id,
            config: flags.config,
            sort_store,
            sort,
            picker: ModelPicker::new(),
            notices: NotificationCenter::new(),
            home,
            movie: movie::MovieScreen::new(),
            user: user::UserScreen::new(),
            current_theme: MarqueeTheme::new(),
            active_mode: theme::detect_mode(),
        };

        let picker_cmds = app.picker.start();
        let picker_task = app.run_picker_cmds(picker_cmds);
        let rows_task = app.home.reload(&app.client, sort);

        (app, Task::batch([picker_task, rows_task]))
    }

    pub fn title(&self) -> String {
        String::from("Marquee")
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Tick => {
                self.notices.sweep(Instant::now());
                Task::none()
            }
            Message::DismissNotice(id) => {
                self.notices.dismiss(id, Instant::now());
                Task::none()
            }
            Message::SortPicked(key) => {
                // Persist first, then clear and re-run the full home
                // fan-out under the new key.
                self.sort = key;
                self.sort_store.set(key);
                self.home.reload(&self.client, key)
            }
            Message::ModelPicked(choice) => {
                let cmds = self.picker.select(&choice.version);
                self.run_picker_cmds(cmds)
            }
            Message::CatalogLoaded(result) => {
                let cmds = self.picker.catalog_loaded(result);
                self.run_picker_cmds(cmds)
            }
            Message::SwitchResolved(result) => {
                let cmds = self.picker.switch_resolved(result);
                self.run_picker_cmds(cmds)
            }
            Message::SettleElapsed => {
                let cmds = self.picker.settle_elapsed();
                self.run_picker_cmds(cmds)
            }
            Message::GoHome => {
                self.page = Page::Home;
                Task::none()
            }
            Message::OpenMovie(movie_id) => self.open_movie(movie_id),
            Message::OpenUser(user_id) => self.open_user(user_id),
            Message::Home(msg) => {
                let action = self.home.update(msg);
                self.handle_action(action)
            }
            Message::Movie(msg) => {
                let action = self.movie.update(msg);
                self.handle_action(action)
            }
            Message::User(msg) => {
                let action = self.user.update(msg, &self.client);
                self.handle_action(action)
            }
        }
    }

    fn handle_action(&mut self, action: Action) -> Task<Message> {
        match action {
            Action::None => Task::none(),
            Action::GoHome => {
                self.page = Page::Home;
                Task::none()
            }
            Action::OpenMovie(movie_id) => self.open_movie(movie_id),
            Action::OpenUser(user_id) => self.open_user(user_id),
            Action::RunTask(task) => task,
        }
    }

    fn open_movie(&mut self, movie_id: u32) -> Task<Message> {
        self.page = Page::Movie;
        self.movie.open(
            movie_id,
            &self.client,
            &self.config.service.model_tag,
            self.config.detail.similar_size,
        )
    }

    fn open_user(&mut self, user_id: u32) -> Task<Message> {
        self.page = Page::User;
        self.user.open(
            user_id,
            &self.client,
            &self.config.service.model_tag,
            self.config.detail.for_you_size,
        )
    }

    /// Execute picker commands: notifications land in the center
    /// immediately, remote calls and the settle timer become tasks.
    fn run_picker_cmds(&mut self, cmds: Vec<PickerCmd>) -> Task<Message> {
        let mut tasks = Vec::new();
        for cmd in cmds {
            match cmd {
                PickerCmd::FetchCatalog => {
                    let client = self.client.clone();
                    tasks.push(Task::perform(
                        async move { client.list_models().await.map_err(|e| e.to_string()) },
                        Message::CatalogLoaded,
                    ));
                }
                PickerCmd::SwitchModel(version) => {
                    let client = self.client.clone();
                    tasks.push(Task::perform(
                        async move {
                            client
                                .switch_model(&version)
                                .await
                                .map_err(|e| e.to_string())
                        },
                        Message::SwitchResolved,
                    ));
                }
                PickerCmd::Notify(severity, message) => {
                    self.notices.push(severity, message, Instant::now());
                }
                PickerCmd::ScheduleSettle(delay) => {
                    tasks.push(Task::perform(
                        async move { tokio::time::sleep(delay).await },
                        |_| Message::SettleElapsed,
                    ));
                }
            }
        }
        if tasks.is_empty() {
            Task::none()
        } else {
            Task::batch(tasks)
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let cs = self.current_theme.colors(self.active_mode);

        let page_content: Element<'_, Message> = match self.page {
            Page::Home => self.home.view(cs).map(Message::Home),
            Page::Movie => self.movie.view(cs).map(Message::Movie),
            Page::User => self.user.view(cs).map(Message::User),
        };

        let main = container(column![self.top_bar(cs), page_content])
            .style(theme::page_background(cs))
            .width(Length::Fill)
            .height(Length::Fill);

        let overlay = toast::notice_overlay(cs, self.notices.notices(), Message::DismissNotice);

        stack![main, overlay].into()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        if self.notices.is_empty() {
            Subscription::none()
        } else {
            subscription::notice_sweep()
        }
    }

    pub fn theme(&self) -> iced::Theme {
        match self.active_mode {
            ThemeMode::Light => iced::Theme::Light,
            ThemeMode::Dark => iced::Theme::Dark,
        }
    }

    fn top_bar<'a>(&'a self, cs: &'a ColorScheme) -> Element<'a, Message> {
        let title = button(
            text("Marquee")
                .size(style::TEXT_LG)
                .line_height(style::LINE_HEIGHT_TIGHT),
        )
        .padding([style::SPACE_XS, style::SPACE_MD])
        .on_press(Message::GoHome)
        .style(theme::ghost_button(cs));

        let for_you = button(
            text("For you")
                .size(style::TEXT_SM)
                .line_height(style::LINE_HEIGHT_NORMAL),
        )
        .padding([style::SPACE_XS, style::SPACE_MD])
        .on_press(Message::OpenUser(self.user_id))
        .style(theme::ghost_button(cs));

        let sort_picker = pick_list(SortKey::ALL, Some(self.sort), Message::SortPicked)
            .text_size(style::TEXT_SM)
            .padding([style::SPACE_XS, style::SPACE_MD])
            .style(theme::pick_list_style(cs))
            .menu_style(theme::pick_list_menu_style(cs));

        let model_control: Element<'_, Message> = if self.picker.phase == PickerPhase::Switching {
            text("Switching...")
                .size(style::TEXT_SM)
                .color(cs.on_surface_variant)
                .line_height(style::LINE_HEIGHT_NORMAL)
                .into()
        } else if self.picker.models.is_empty() {
            text("No models")
                .size(style::TEXT_SM)
                .color(cs.outline)
                .line_height(style::LINE_HEIGHT_NORMAL)
                .into()
        } else {
            let choices: Vec<ModelChoice> = self
                .picker
                .models
                .iter()
                .map(ModelChoice::from_entry)
                .collect();
            let selected = self.picker.current_entry().map(ModelChoice::from_entry);
            pick_list(choices, selected, Message::ModelPicked)
                .text_size(style::TEXT_SM)
                .padding([style::SPACE_XS, style::SPACE_MD])
                .style(theme::pick_list_style(cs))
                .menu_style(theme::pick_list_menu_style(cs))
                .into()
        };

        let label = |s: &'static str| {
            text(s)
                .size(style::TEXT_XS)
                .color(cs.on_surface_variant)
                .line_height(style::LINE_HEIGHT_LOOSE)
        };

        container(
            row![
                title,
                for_you,
                iced::widget::Space::new().width(Length::Fill),
                label("Sort"),
                sort_picker,
                label("Model"),
                model_control,
            ]
            .spacing(style::SPACE_SM)
            .align_y(Alignment::Center),
        )
        .style(theme::top_bar(cs))
        .width(Length::Fill)
        .padding([style::SPACE_SM, style::SPACE_LG])
        .into()
    }
}
