//! App Orchestration
//!
//! `App` owns the model and the channels to the background tasks. Every
//! change flows through `App::update(Msg)`; the methods that implement each
//! kind of change live in the submodules, grouped by domain:
//! - mutations: add, import, edit, delete, reorder commit, restore
//! - gestures: tap / swipe / drop outcomes from pointer input
//! - confirm: opening and resolving the confirmation gate
//! - backup: backup dialog, settings auto-save, backup and restore jobs
//! - clipboard: copying codes through the configured command
//! - refresh: scheduler ticks and code regeneration

pub(crate) mod backup;
pub(crate) mod clipboard;
pub(crate) mod confirm;
pub(crate) mod gestures;
pub(crate) mod mutations;
pub(crate) mod refresh;

pub use backup::{BACKUP_ACCENT, RESTORE_ACCENT};

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::handlers;
use crate::handlers::mouse::MouseTracker;
use crate::logic::gesture::GestureConfig;
use crate::messages::Msg;
use crate::model::{Account, GitSettings, Model};
use crate::services::migration::MigrationDecoder;
use crate::services::otp::OtpEngine;
use crate::services::{spawn_service_worker, Clock, RefreshScheduler, ServiceRequest, ServiceResponse, Services, Tick};

/// Runtime options (from config file and CLI)
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub vim_mode: bool,
    pub clipboard_command: Option<String>,
    pub tick_period: Duration,
    /// Pointer units per terminal column
    pub cell_width_px: u16,
    pub gesture: GestureConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            vim_mode: false,
            clipboard_command: None,
            tick_period: Duration::from_millis(100),
            cell_width_px: 8,
            gesture: GestureConfig::default(),
        }
    }
}

/// External collaborators the app talks to
#[derive(Clone)]
pub struct Collaborators {
    pub services: Services,
    pub engine: Arc<dyn OtpEngine>,
    pub decoder: Arc<dyn MigrationDecoder>,
    pub clock: Arc<dyn Clock>,
}

pub struct App {
    pub model: Model,

    pub(crate) config: AppConfig,
    pub(crate) engine: Arc<dyn OtpEngine>,
    pub(crate) decoder: Arc<dyn MigrationDecoder>,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) mouse: MouseTracker,

    service_tx: mpsc::UnboundedSender<ServiceRequest>,
    service_rx: mpsc::UnboundedReceiver<ServiceResponse>,
    worker: JoinHandle<()>,

    tick_tx: mpsc::UnboundedSender<Tick>,
    tick_rx: mpsc::UnboundedReceiver<Tick>,
    scheduler: RefreshScheduler,
}

impl App {
    /// Build the app around an already-loaded list
    ///
    /// Spawns the service worker, so this must run inside a tokio runtime.
    /// The refresh scheduler is started separately with `start_scheduler`.
    pub fn new(accounts: Vec<Account>, settings: GitSettings, config: AppConfig, collaborators: Collaborators) -> Self {
        let (service_tx, service_rx, worker) = spawn_service_worker(collaborators.services);
        let (tick_tx, tick_rx) = mpsc::unbounded_channel();

        let mut model = Model::new(accounts, config.vim_mode, config.gesture);
        model.settings = settings;

        let mut app = Self {
            model,
            config,
            engine: collaborators.engine,
            decoder: collaborators.decoder,
            clock: collaborators.clock,
            mouse: MouseTracker::default(),
            service_tx,
            service_rx,
            worker,
            tick_tx,
            tick_rx,
            scheduler: RefreshScheduler::new(),
        };

        // First paint: codes and countdown without waiting for a tick
        let now = app.clock.now_secs();
        app.on_tick(now);
        app
    }

    /// Load the list and settings from persistence, then build the app
    pub async fn load(config: AppConfig, collaborators: Collaborators) -> Result<Self> {
        let persistence = collaborators.services.persistence.clone();
        let accounts = persistence.load_accounts().await?;
        let settings = persistence.load_git_settings().await?;
        tracing::info!(count = accounts.len(), "loaded accounts");
        Ok(Self::new(accounts, settings, config, collaborators))
    }

    /// Single entry point for state changes
    pub fn update(&mut self, msg: Msg) {
        match msg {
            Msg::Key(key) => handlers::keyboard::handle_key(self, key),
            Msg::Mouse(event) => handlers::mouse::handle_mouse(self, event),
            Msg::Tick(tick) => self.on_tick(tick.now_secs),
            Msg::Service(response) => handlers::service::handle_service_response(self, response),
        }
    }

    /// Drain scheduler ticks and service responses without blocking
    pub fn drain_background(&mut self) {
        // Only the newest tick matters for the countdown, but each may cross a boundary
        while let Ok(tick) = self.tick_rx.try_recv() {
            self.update(Msg::Tick(tick));
        }
        while let Ok(response) = self.service_rx.try_recv() {
            self.update(Msg::Service(response));
        }
    }

    /// Wait for the next service response and apply it
    ///
    /// Returns false if the worker has gone away.
    pub async fn process_next_service_response(&mut self) -> bool {
        match self.service_rx.recv().await {
            Some(response) => {
                self.update(Msg::Service(response));
                true
            }
            None => false,
        }
    }

    /// Start the refresh scheduler (no-op if already running)
    pub fn start_scheduler(&mut self) -> bool {
        self.scheduler
            .start(self.clock.clone(), self.config.tick_period, self.tick_tx.clone())
    }

    pub fn scheduler_running(&self) -> bool {
        self.scheduler.is_running()
    }

    pub(crate) fn send(&self, request: ServiceRequest) {
        if self.service_tx.send(request).is_err() {
            tracing::warn!("service worker is gone, request dropped");
        }
    }

    /// Queue a save of the full list in canonical order
    pub(crate) fn persist(&self) {
        self.send(ServiceRequest::SaveAccounts(self.model.store.to_vec()));
    }

    /// Full re-derivation of the list view, with fresh codes
    ///
    /// Pointer state captured against the old view is dropped with it.
    pub fn rerender(&mut self) {
        self.model.rerender();
        self.mouse.clear();
        self.regenerate_codes(self.clock.now_secs());
    }

    /// Stop the scheduler and let the worker finish queued saves
    pub async fn shutdown(self) {
        let App {
            mut scheduler,
            service_tx,
            worker,
            ..
        } = self;

        scheduler.stop();
        drop(service_tx);
        if tokio::time::timeout(Duration::from_secs(2), worker).await.is_err() {
            tracing::warn!("service worker did not finish in time");
        }
    }
}
