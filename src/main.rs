use std::time::Instant;

use clap::Parser;
use iced::{event, mouse, window, Element, Event, Point, Subscription, Task, Theme};
use tracing_subscriber::EnvFilter;

mod audio;
mod config;
mod fetch;
mod state;
mod ui;

use audio::{Playback, PlaybackError, Track};
use config::{Args, InvitationConfig};
use fetch::{FetchError, Fetcher};
use state::audio::AudioCommand;
use state::data::Overlay;
use state::effects::{self, EffectId};
use state::gallery::GalleryError;
use state::page::PageContext;
use ui::backdrop::{Backdrop, SparkleLayer};
use ui::photos::{LoadedPhoto, PhotoCache};
use ui::scene::Scene;

/// Log filter used when RUST_LOG is not set
const DEFAULT_LOG_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn,cosmic_text=warn";

/// Main application state
struct InviteApp {
    /// Overlays, gallery cursor, sparkles, audio gate and pointer
    page: PageContext,
    /// What the invitation says
    config: InvitationConfig,
    /// Background music output
    playback: Box<dyn Playback>,
    /// Shared by every photo and music download
    fetcher: Fetcher,
    /// Decoded gallery photos
    photos: PhotoCache,
    /// When the page opened (drives the ambient animation)
    started: Instant,
    /// Time of the latest animation frame
    now: Instant,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// The pointer moved anywhere in the window
    PointerMoved(Point),
    /// A left click anywhere in the window, on a control or not
    DocumentClicked,
    /// Animation frame
    Frame(Instant),
    Open(Overlay),
    Close(Overlay),
    NextPhoto,
    PreviousPhoto,
    /// A gallery thumbnail was picked
    SelectPhoto(usize),
    /// A sparkle's lifetime is over
    SparkleExpired(EffectId),
    /// The play/mute control was pressed
    ToggleAudio,
    /// Background fetch of the music track finished
    TrackLoaded(Result<Track, PlaybackError>),
    /// Background fetch and decode of a photo finished
    PhotoLoaded(u32, Result<LoadedPhoto, FetchError>),
    GetDirections,
    /// The user asked to close the window
    CloseRequested,
}

impl InviteApp {
    /// Create a new instance of the application.
    ///
    /// Fails if the invitation has no photos.
    fn new(
        config: InvitationConfig,
        playback: Box<dyn Playback>,
        fetcher: Fetcher,
    ) -> Result<(Self, Task<Message>), GalleryError> {
        let page = PageContext::new(config.photos.clone())?;

        let loads = config.photos.iter().cloned().map(|photo| {
            let id = photo.id;
            Task::perform(ui::photos::load(fetcher.clone(), photo), move |result| {
                Message::PhotoLoaded(id, result)
            })
        });
        let startup = Task::batch(loads);

        tracing::info!(
            "💍 invitation for {} ready with {} photos",
            config.couple,
            page.gallery.len()
        );

        let now = Instant::now();
        Ok((
            InviteApp {
                page,
                config,
                playback,
                fetcher,
                photos: PhotoCache::new(),
                started: now,
                now,
            },
            startup,
        ))
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PointerMoved(point) => {
                self.page.on_pointer_moved(point.into());
                Task::none()
            }
            Message::DocumentClicked => {
                let outcome = self.page.on_click(Instant::now());

                // One timer per sparkle
                let expiry = Task::perform(
                    effects::expire_after(outcome.sparkle),
                    Message::SparkleExpired,
                );

                match outcome.audio {
                    Some(command) => Task::batch([expiry, self.run_audio(command)]),
                    None => expiry,
                }
            }
            Message::Frame(now) => {
                self.now = now;
                Task::none()
            }
            Message::Open(overlay) => {
                self.page.overlays.open(overlay);
                Task::none()
            }
            Message::Close(overlay) => {
                self.page.overlays.close(overlay);
                Task::none()
            }
            Message::NextPhoto => {
                self.page.gallery.next();
                Task::none()
            }
            Message::PreviousPhoto => {
                self.page.gallery.previous();
                Task::none()
            }
            Message::SelectPhoto(index) => {
                if let Err(error) = self.page.gallery.select(index) {
                    tracing::warn!(%error, "ignoring photo selection");
                }
                Task::none()
            }
            Message::SparkleExpired(id) => {
                self.page.effects.remove(id);
                Task::none()
            }
            Message::ToggleAudio => match self.page.audio.toggle() {
                Some(command) => self.run_audio(command),
                None => Task::none(),
            },
            Message::TrackLoaded(result) => {
                let outcome = result.and_then(|track| self.start_track(&track));
                self.settle(outcome)
            }
            Message::PhotoLoaded(id, result) => {
                self.photos.insert(id, result);
                Task::none()
            }
            Message::GetDirections => {
                if let Err(error) = open::that_detached(&self.config.directions_url) {
                    tracing::warn!(%error, url = %self.config.directions_url, "could not open directions");
                }
                Task::none()
            }
            Message::CloseRequested => {
                self.page.teardown();
                iced::exit()
            }
        }
    }

    /// Carry out a command from the audio gate
    fn run_audio(&mut self, command: AudioCommand) -> Task<Message> {
        match command {
            AudioCommand::Activate { volume } => {
                self.playback.set_volume(volume);
                self.start_playback()
            }
            AudioCommand::Resume => self.start_playback(),
            AudioCommand::Pause => {
                self.playback.pause();
                Task::none()
            }
        }
    }

    /// Start playing, fetching the track first if it has not been loaded.
    /// The outcome always goes back to the audio gate.
    fn start_playback(&mut self) -> Task<Message> {
        if self.playback.is_loaded() {
            let outcome = self.playback.play();
            return self.settle(outcome);
        }

        Task::perform(
            audio::load_track(self.fetcher.clone(), self.config.audio_source.clone()),
            Message::TrackLoaded,
        )
    }

    /// Hand a start outcome to the gate and carry out its follow-up, if any
    fn settle(&mut self, outcome: Result<(), PlaybackError>) -> Task<Message> {
        match self.page.audio.resolve(outcome) {
            Some(command) => self.run_audio(command),
            None => Task::none(),
        }
    }

    fn start_track(&mut self, track: &Track) -> Result<(), PlaybackError> {
        self.playback.load(track)?;
        self.playback.play()
    }

    /// What is on screen right now
    fn scene(&self) -> Scene {
        Scene::build(&self.page, &self.config)
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let backdrop = Backdrop {
            pointer: self.page.pointer.current_position(),
            elapsed: self.now.duration_since(self.started).as_secs_f32(),
        };
        let sparkles = SparkleLayer::new(
            self.page
                .effects
                .iter()
                .map(|(_, sparkle)| (sparkle.position, sparkle.progress(self.now)))
                .collect(),
        );

        ui::render::page(self.scene(), &self.photos, backdrop, sparkles)
    }

    /// Window-wide input plus the animation clock
    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            event::listen_with(runtime_event),
            window::frames().map(Message::Frame),
        ])
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Light
    }
}

/// Map raw runtime events to messages.
///
/// Clicks are reported whether or not a widget captured them: the sparkle
/// and the audio gate react to clicks on buttons too.
fn runtime_event(event: Event, _status: event::Status, _window: window::Id) -> Option<Message> {
    match event {
        Event::Mouse(mouse::Event::CursorMoved { position }) => Some(Message::PointerMoved(position)),
        Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
            Some(Message::DocumentClicked)
        }
        Event::Window(window::Event::CloseRequested) => Some(Message::CloseRequested),
        _ => None,
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let args = Args::parse();
    let config = InvitationConfig::resolve(&args)?;
    let fetcher = Fetcher::new()?;
    let (app, startup) = InviteApp::new(config, audio::open_default_output(), fetcher)?;

    iced::application("Wedding Invitation", InviteApp::update, InviteApp::view)
        .subscription(InviteApp::subscription)
        .theme(InviteApp::theme)
        .window_size((1024.0, 768.0))
        .exit_on_close_request(false)
        .centered()
        .run_with(move || (app, startup))?;

    Ok(())
}
