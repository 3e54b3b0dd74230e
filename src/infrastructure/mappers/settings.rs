use crate::domain::settings::{FeatureFlags, Settings, Theme};
use crate::infrastructure::remote::settings::{FeatureFlagsModel, SettingsModel};

fn theme_from_wire(theme: &str) -> Theme {
    match theme {
        "light" => Theme::Light,
        "dark" => Theme::Dark,
        _ => Theme::System,
    }
}

fn theme_to_wire(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => "light",
        Theme::Dark => "dark",
        Theme::System => "system",
    }
}

pub fn to_entity(model: SettingsModel) -> Settings {
    Settings {
        push_notifications: model.push_notifications,
        email_notifications: model.email_notifications,
        theme: theme_from_wire(&model.theme),
        language: model.language,
        private_profile: model.private_profile,
    }
}

pub fn to_model(settings: Settings) -> SettingsModel {
    SettingsModel {
        push_notifications: settings.push_notifications,
        email_notifications: settings.email_notifications,
        theme: theme_to_wire(settings.theme).to_string(),
        language: settings.language,
        private_profile: settings.private_profile,
    }
}

pub fn flags_to_entity(model: FeatureFlagsModel) -> FeatureFlags {
    FeatureFlags::new(model)
}
