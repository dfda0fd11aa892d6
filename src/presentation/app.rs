use crate::domain::models::{AppEvent, MessageSeverity, StatusMessage, SyncCommand};
use crate::domain::settings::SettingsService;
use crate::domain::timezone::{self, TimezoneRule};
use crate::infrastructure::bluetooth::{protocol, PlatformRadio, SyncService};
use crate::infrastructure::logging::LoggingGuard;
use crate::presentation::components::Components;
use crate::presentation::session::SyncSession;
use crate::presentation::theme::{self, Palette};
use eframe::egui;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

pub struct TimeSyncApp {
    settings: SettingsService,

    // Bluetooth worker
    sync_tx: mpsc::UnboundedSender<SyncCommand>,
    event_rx: mpsc::UnboundedReceiver<AppEvent>,

    // State
    selected_timezone: &'static TimezoneRule,
    session: SyncSession,

    // UI Options
    is_dark_mode: bool,

    _logging_guard: Option<LoggingGuard>,
}

impl TimeSyncApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: SettingsService,
        logging_guard: Option<LoggingGuard>,
    ) -> Self {
        theme::apply_theme(&cc.egui_ctx, false);

        let (sync_tx, event_rx) = spawn_sync_worker();
        let selected_timezone = settings.get().timezone_rule();

        Self {
            settings,
            sync_tx,
            event_rx,
            selected_timezone,
            session: SyncSession::default(),
            is_dark_mode: false,
            _logging_guard: logging_guard,
        }
    }

    fn trigger_sync(&mut self) {
        if !self.session.begin() {
            return;
        }

        info!("Sync requested with timezone {}", self.selected_timezone.label);
        let command = SyncCommand::Sync {
            timezone: self.selected_timezone,
        };
        if self.sync_tx.send(command).is_err() {
            error!("Bluetooth worker is not running");
            self.session.abandon();
            self.session.log.push(StatusMessage::new(
                "Bluetooth worker is not running",
                MessageSeverity::Error,
            ));
        }
    }

    fn select_timezone(&mut self, rule: &'static TimezoneRule) {
        if rule == self.selected_timezone {
            return;
        }
        self.selected_timezone = rule;
        if let Err(e) = self.settings.set_timezone(rule) {
            warn!("Failed to save settings: {}", e);
        }
    }

    fn ui_sync_panel(&mut self, ui: &mut egui::Ui) {
        let busy = self.session.is_busy();
        let mut choice = self.selected_timezone;

        Components::card(ui, "Time Sync", |ui| {
            ui.horizontal(|ui| {
                ui.label("Device:");
                ui.monospace(protocol::TARGET_DEVICE_NAME);
            });

            ui.add_enabled_ui(!busy, |ui| {
                egui::ComboBox::from_label("Select Timezone")
                    .selected_text(choice.label)
                    .show_ui(ui, |ui| {
                        for tz in timezone::TIMEZONES {
                            ui.selectable_value(&mut choice, tz, tz.label);
                        }
                    });
            });

            ui.horizontal(|ui| {
                let button = egui::Button::new("Sync Time with Device");
                if ui.add_enabled(!busy, button).clicked() {
                    self.trigger_sync();
                }
                if busy {
                    ui.spinner();
                }
            });
        });

        self.select_timezone(choice);
    }

    fn ui_status_panel(&self, ui: &mut egui::Ui) {
        let palette = Palette::new(self.is_dark_mode);

        Components::card(ui, "Status", |ui| {
            let (bg, fg) = palette.phase(self.session.phase);
            Components::status_banner(ui, self.session.phase.label(), bg, fg);

            for msg in &self.session.log {
                ui.label(
                    egui::RichText::new(&msg.message)
                        .color(palette.severity(msg.severity))
                        .strong(),
                );
            }

            if !self.session.is_busy() {
                if let Some(Err(e)) = &self.session.last_result {
                    if e.severity() == MessageSeverity::Error {
                        ui.add_space(8.0);
                        ui.label("Check that Bluetooth is enabled and the device is in range.");
                    }
                }
            }
        });
    }
}

impl eframe::App for TimeSyncApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        loop {
            match self.event_rx.try_recv() {
                Ok(event) => self.session.apply(event),
                Err(mpsc::error::TryRecvError::Empty) => break,
                Err(mpsc::error::TryRecvError::Disconnected) => {
                    if self.session.is_busy() {
                        error!("Bluetooth worker stopped mid-sync");
                        self.session.abandon();
                    }
                    break;
                }
            }
        }

        if self.session.is_busy() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.label(egui::RichText::new("BLE Time Sync").strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let switch_icon = if self.is_dark_mode {
                        "☀ Light"
                    } else {
                        "🌙 Dark"
                    };
                    if ui.button(switch_icon).clicked() {
                        self.is_dark_mode = !self.is_dark_mode;
                        theme::apply_theme(ctx, self.is_dark_mode);
                    }
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.set_max_width(600.0);
                    ui.add_space(20.0);
                    Components::heading(ui, "One-Click BLE Time Sync");
                    ui.add_space(20.0);
                    self.ui_sync_panel(ui);
                    ui.add_space(15.0);
                    self.ui_status_panel(ui);
                });
            });
        });
    }
}

/// Run the radio on its own thread; commands are handled one at a time
fn spawn_sync_worker() -> (
    mpsc::UnboundedSender<SyncCommand>,
    mpsc::UnboundedReceiver<AppEvent>,
) {
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let (cmd_tx, mut cmd_rx) = mpsc::unbounded_channel::<SyncCommand>();

    std::thread::spawn(move || {
        let rt = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(rt) => rt,
            Err(e) => {
                error!("Failed to create tokio runtime for Bluetooth: {}", e);
                return;
            }
        };

        rt.block_on(async move {
            let mut service = SyncService::new(
                PlatformRadio::new(),
                event_tx,
                protocol::TARGET_DEVICE_NAME,
                protocol::SCAN_WINDOW,
            );

            while let Some(cmd) = cmd_rx.recv().await {
                match cmd {
                    SyncCommand::Sync { timezone } => {
                        if let Err(e) = service.run(timezone).await {
                            info!("Sync ended without writing: {}", e);
                        }
                        debug!("Sync finished in phase {:?}", service.phase());
                    }
                }
            }
        });
    });

    (cmd_tx, event_rx)
}
