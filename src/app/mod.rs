use std::sync::Arc;
use std::time::Duration;

use eframe::egui::{self, Context};
use tracing::{info, warn};

use crate::layout::CirclePacker;
use crate::notion::NotionGateway;
use crate::store::KeyValueStore;

use self::canvas::{VizAction, VizController};
use self::load::spawn_load;
use self::session::SessionForm;

mod canvas;
mod load;
mod render_utils;
mod session;
mod ui;

const LOAD_POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct AppConfig {
    pub gateway: Arc<NotionGateway>,
    pub fallback_credential: Option<String>,
    pub store: Box<dyn KeyValueStore>,
}

pub struct NotionCirclesApp {
    gateway: Arc<NotionGateway>,
    fallback_credential: Option<String>,
    store: Box<dyn KeyValueStore>,
    session: SessionForm,
    viz: VizController,
}

impl NotionCirclesApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let session = SessionForm::restore(config.store.as_ref());
        Self {
            gateway: config.gateway,
            fallback_credential: config.fallback_credential,
            store: config.store,
            session,
            viz: VizController::new(Box::new(CirclePacker)),
        }
    }

    fn start_load(&mut self) {
        match self
            .session
            .submit(self.store.as_mut(), self.fallback_credential.as_deref())
        {
            Ok(request) => {
                let rx = spawn_load(Arc::clone(&self.gateway), request);
                self.session.begin_loading(rx);
            }
            Err(error) => warn!(%error, "organization load not started"),
        }
    }

    fn receive_load(&mut self) {
        if let Some(tree) = self.session.poll() {
            self.viz.load(tree);
        }
    }

    fn apply_action(ctx: &Context, action: VizAction) {
        match action {
            VizAction::OpenUrl(url) => {
                info!(%url, "opening role page");
                ctx.open_url(egui::OpenUrl::new_tab(url));
            }
        }
    }
}

impl eframe::App for NotionCirclesApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.receive_load();
        if self.session.is_loading() {
            ctx.request_repaint_after(LOAD_POLL_INTERVAL);
        }

        let outcome = self.show(ctx);

        if outcome.submit_requested {
            self.start_load();
        }
        if let Some(action) = outcome.action {
            Self::apply_action(ctx, action);
        }
    }
}
