//! Interactive session
//!
//! A single state machine drives the whole tool: pick a bucket, browse
//! its folders page by page, download files. Every backend failure is
//! shown as a message and the loop carries on; only quitting, Ctrl-C or
//! closed input end the session.

use std::io;
use std::path::PathBuf;

use ss3_core::backend::{self, KNOWN_REGIONS};
use ss3_core::{BackendConfig, Error, Item, Navigator, Pager, StoreFactory};

use crate::command::Command;
use crate::console::{Console, ListingView};
use crate::download;

/// Bucket prompt token that opens the region picker
pub const REGION_TOKEN: &str = ":region";

/// Bucket prompt token that opens the profile picker
pub const PROFILE_TOKEN: &str = ":profile";

pub const INVALID_OPTION: &str = "Invalid option. Press 'H' for help.";

const NOT_SET: &str = "NOT SET";

/// Where the session is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    SelectingBucket,
    Browsing,
    AwaitingDownloadName { key: String, default_name: String },
    Exiting,
}

/// Session settings taken from the config file
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub page_size: usize,
    pub download_dir: PathBuf,
    /// AWS credentials file scanned for profiles
    pub credentials_file: Option<PathBuf>,
    /// AWS config file scanned for profiles
    pub config_file: Option<PathBuf>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            page_size: ss3_core::pager::DEFAULT_PAGE_SIZE,
            download_dir: PathBuf::from("."),
            credentials_file: backend::credentials_file(),
            config_file: backend::config_file(),
        }
    }
}

pub struct Session<C, F> {
    console: C,
    factory: F,
    backend: BackendConfig,
    navigator: Navigator,
    pager: Pager,
    options: SessionOptions,
    state: State,
    pending_bucket: Option<String>,
}

impl<C: Console, F: StoreFactory> Session<C, F> {
    pub fn new(
        console: C,
        factory: F,
        backend: BackendConfig,
        navigator: Navigator,
        options: SessionOptions,
    ) -> Self {
        Self {
            console,
            factory,
            backend,
            navigator,
            pager: Pager::new(options.page_size),
            options,
            state: State::SelectingBucket,
            pending_bucket: None,
        }
    }

    /// Connect to `bucket` first instead of asking for one
    pub fn with_initial_bucket(mut self, bucket: Option<String>) -> Self {
        self.pending_bucket = bucket.filter(|b| !b.trim().is_empty());
        self
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub fn backend(&self) -> &BackendConfig {
        &self.backend
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    /// Run until the user quits or input ends
    pub async fn run(&mut self) -> io::Result<()> {
        while self.state != State::Exiting {
            self.step().await?;
        }
        Ok(())
    }

    /// Perform one transition
    pub async fn step(&mut self) -> io::Result<()> {
        let result = match self.state.clone() {
            State::SelectingBucket => self.select_bucket().await,
            State::Browsing => self.browse().await,
            State::AwaitingDownloadName { key, default_name } => {
                self.download(&key, &default_name).await
            }
            State::Exiting => Ok(()),
        };

        match result {
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::Interrupted | io::ErrorKind::UnexpectedEof
                ) =>
            {
                tracing::debug!(error = %e, "Input ended");
                self.state = State::Exiting;
                Ok(())
            }
            other => other,
        }
    }

    async fn select_bucket(&mut self) -> io::Result<()> {
        let input = match self.pending_bucket.take() {
            Some(bucket) => bucket,
            None => {
                let prompt = self.bucket_prompt();
                self.console.prompt_line(&prompt)?
            }
        };
        let input = input.trim();

        match input.to_lowercase().as_str() {
            "q" => self.state = State::Exiting,
            REGION_TOKEN => self.change_region().await?,
            PROFILE_TOKEN => self.change_profile().await?,
            "" => match self.navigator.bucket().map(str::to_string) {
                Some(previous) => self.connect_bucket(&previous).await?,
                None => self.console.render_message("Please enter a bucket name.")?,
            },
            _ => self.connect_bucket(input).await?,
        }
        Ok(())
    }

    fn bucket_prompt(&self) -> String {
        let region = self
            .navigator
            .store()
            .region()
            .unwrap_or_else(|| NOT_SET.to_string());
        let profile = backend::current_profile(&self.backend).unwrap_or_else(|| NOT_SET.to_string());
        let keep = match self.navigator.bucket() {
            Some(bucket) => format!("Enter keeps '{bucket}', "),
            None => String::new(),
        };
        format!(
            "Region: {region} | Profile: {profile}\n\
             Enter the S3 bucket name ({keep}{REGION_TOKEN}, {PROFILE_TOKEN}, q to quit): "
        )
    }

    async fn connect_bucket(&mut self, bucket: &str) -> io::Result<()> {
        self.console
            .begin_wait(&format!("Connecting to '{bucket}'..."));
        let probed = self.navigator.probe(bucket).await;
        self.console.end_wait();

        match probed {
            Ok(()) => {
                tracing::debug!(bucket, "Connected to bucket");
                self.navigator.change_bucket(bucket);
                self.pager.reset();
                self.state = State::Browsing;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(bucket, error = %e, "Bucket is not reachable");
                self.console.render_message(&failure_message(&e))
            }
        }
    }

    async fn change_region(&mut self) -> io::Result<()> {
        let current = self
            .navigator
            .store()
            .region()
            .unwrap_or_else(|| NOT_SET.to_string());
        let regions: Vec<String> = KNOWN_REGIONS.iter().map(|r| r.to_string()).collect();

        let title = format!("Select a new region (Current: {current})");
        if let Some(index) = self.console.choose(&title, &regions)? {
            let config = self.backend.clone().with_region(regions[index].clone());
            self.reconnect(config).await?;
        }
        Ok(())
    }

    async fn change_profile(&mut self) -> io::Result<()> {
        let profiles = match backend::list_profiles(
            self.options.credentials_file.as_deref(),
            self.options.config_file.as_deref(),
        ) {
            Ok(profiles) if profiles.is_empty() => {
                return self
                    .console
                    .render_message("No profiles found in the AWS credentials files.");
            }
            Ok(profiles) => profiles,
            Err(e) => return self.console.render_message(&e.to_string()),
        };

        let current = backend::current_profile(&self.backend).unwrap_or_else(|| NOT_SET.to_string());
        let title = format!("Select a new profile (Current: {current})");
        if let Some(index) = self.console.choose(&title, &profiles)? {
            let config = self.backend.clone().with_profile(profiles[index].clone());
            self.reconnect(config).await?;
        }
        Ok(())
    }

    /// Build a fresh store for `config`; the old one stays on failure
    async fn reconnect(&mut self, config: BackendConfig) -> io::Result<()> {
        self.console.begin_wait("Connecting...");
        let connected = self.factory.connect(&config).await;
        self.console.end_wait();

        match connected {
            Ok(store) => {
                let region = store.region().unwrap_or_else(|| NOT_SET.to_string());
                self.navigator.replace_store(store);
                self.backend = config;
                let profile =
                    backend::current_profile(&self.backend).unwrap_or_else(|| NOT_SET.to_string());
                self.console
                    .render_message(&format!("Now using region {region} with profile {profile}."))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Could not rebuild the S3 client");
                self.console
                    .render_message(&format!("Could not switch: {e}"))
            }
        }
    }

    async fn browse(&mut self) -> io::Result<()> {
        let Some(bucket) = self.navigator.bucket().map(str::to_string) else {
            self.state = State::SelectingBucket;
            return Ok(());
        };

        self.console.begin_wait("Loading items...");
        let listed = self.navigator.list_items().await;
        self.console.end_wait();

        let items = match listed {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(
                    bucket = %bucket,
                    path = self.navigator.current_path(),
                    error = %e,
                    "Listing failed"
                );
                self.console
                    .render_message(&format!("Failed to load items: {e}"))?;
                self.state = State::SelectingBucket;
                return Ok(());
            }
        };

        self.pager.clamp(items.len());
        let view = ListingView {
            bucket: &bucket,
            path: self.navigator.current_path(),
            page: self.pager.view(&items),
            at_root: self.navigator.is_at_root(),
        };
        self.console.render_listing(&view)?;

        let input = self.console.read_command()?;
        self.dispatch(Command::parse(&input), &items)
    }

    fn dispatch(&mut self, command: Command, items: &[Item]) -> io::Result<()> {
        match command {
            Command::Quit => self.state = State::Exiting,
            Command::Help => self.console.render_help()?,
            Command::NewBucket => {
                self.navigator.reset_path();
                self.pager.reset();
                self.state = State::SelectingBucket;
            }
            Command::Back => {
                self.navigator.go_back();
                self.pager.reset();
            }
            Command::NextPage => {
                self.pager.next(items.len());
            }
            Command::PrevPage => {
                self.pager.prev();
            }
            Command::Select(index) => match items.get(index) {
                Some(item) if item.is_folder() => match self.navigator.enter_folder(&item.name) {
                    Ok(()) => self.pager.reset(),
                    Err(e) => self.console.render_message(&e.to_string())?,
                },
                Some(item) => {
                    let key = format!("{}{}", self.navigator.current_path(), item.name);
                    let default_name = download::default_download_name(&key);
                    self.state = State::AwaitingDownloadName { key, default_name };
                }
                None => self.console.render_message(INVALID_OPTION)?,
            },
            Command::Invalid(_) => self.console.render_message(INVALID_OPTION)?,
        }
        Ok(())
    }

    async fn download(&mut self, key: &str, default_name: &str) -> io::Result<()> {
        // Back to the same page whatever the outcome
        self.state = State::Browsing;

        let input = self
            .console
            .prompt_line(&download::rename_prompt(default_name))?;
        let Some(destination) =
            download::resolve_destination(&self.options.download_dir, &input, default_name)
        else {
            return self.console.render_message(download::INVALID_NAME);
        };

        self.console.begin_wait(&format!("Downloading '{key}'..."));
        let result = self.navigator.download(key, &destination).await;
        self.console.end_wait();

        let message = match result {
            Ok(bytes) => download::success_message(&destination, bytes),
            Err(e) => {
                tracing::warn!(key, error = %e, "Download failed");
                format!("Failed to download '{key}': {e}")
            }
        };
        self.console.render_message(&message)
    }
}

fn failure_message(error: &Error) -> String {
    if error.is_retryable() {
        format!("{error} Try again in a moment.")
    } else {
        error.to_string()
    }
}
