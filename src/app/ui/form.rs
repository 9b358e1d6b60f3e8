use eframe::egui::{Button, Color32, RichText, TextEdit, Ui};

use super::super::NotionCirclesApp;

const ERROR_COLOR: Color32 = Color32::from_rgb(0xdc, 0x26, 0x26);
const NOTICE_COLOR: Color32 = Color32::from_rgb(0x05, 0x96, 0x69);

impl NotionCirclesApp {
    pub(in crate::app) fn draw_form(&mut self, ui: &mut Ui) -> bool {
        ui.heading("Notion connection");
        ui.separator();
        ui.add_space(4.0);

        ui.label("API key")
            .on_hover_text("Internal integration secret. Leave empty to use NOTION_KEY.");
        ui.add(
            TextEdit::singleline(&mut self.session.credential)
                .password(true)
                .hint_text("secret_..."),
        );
        if self
            .session
            .uses_fallback_key(self.fallback_credential.as_deref())
        {
            ui.small(RichText::new("Using environment key").color(NOTICE_COLOR));
        }
        ui.add_space(6.0);

        ui.label("Roles database ID")
            .on_hover_text("Database id or the full Notion URL of the roles database.");
        ui.text_edit_singleline(&mut self.session.roles_db);
        ui.add_space(6.0);

        ui.label("Circles database ID")
            .on_hover_text("Database id or the full Notion URL of the circles database.");
        ui.text_edit_singleline(&mut self.session.circles_db);
        ui.add_space(10.0);

        let loading = self.session.is_loading();
        let mut submitted = false;
        ui.horizontal(|ui| {
            let label = if loading {
                "Loading..."
            } else {
                "Generate visualization"
            };
            submitted = ui.add_enabled(!loading, Button::new(label)).clicked();
            if loading {
                ui.spinner();
            }
        });

        if let Some(error) = self.session.error() {
            ui.add_space(6.0);
            ui.colored_label(ERROR_COLOR, error);
        }

        submitted
    }
}
