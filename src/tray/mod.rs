pub mod icons;

use crate::config::Interval;
use crate::ipc::Command;
use ksni::menu::StandardItem;
use ksni::{MenuItem, ToolTip};
use tokio::sync::mpsc;

/// System tray icon; menu clicks are forwarded to the event loop
pub struct BackgroundTray {
    commands: mpsc::Sender<Command>,
    interval: Interval,
    icon: Option<ksni::Icon>,
}

impl BackgroundTray {
    #[must_use]
    pub fn new(commands: mpsc::Sender<Command>, interval: Interval) -> Self {
        let icon = icons::render_svg_to_argb32(icons::ICON_TRAY);
        if icon.is_none() {
            tracing::warn!("Failed to render tray icon, falling back to theme icon");
        }
        Self {
            commands,
            interval,
            icon,
        }
    }

    /// Run the StatusNotifierItem service on its own thread
    pub fn spawn(self) -> ksni::Handle<Self> {
        let service = ksni::TrayService::new(self);
        let handle = service.handle();
        service.spawn();
        handle
    }

    fn send(&self, cmd: Command) {
        if let Err(e) = self.commands.try_send(cmd) {
            tracing::error!("Failed to forward {cmd:?} from tray: {e}");
        }
    }

    fn action(label: &str, cmd: Command) -> MenuItem<Self> {
        StandardItem {
            label: label.to_string(),
            activate: Box::new(move |tray: &mut Self| tray.send(cmd)),
            ..Default::default()
        }
        .into()
    }
}

impl ksni::Tray for BackgroundTray {
    fn id(&self) -> String {
        crate::config::APP_NAME.to_string()
    }

    fn title(&self) -> String {
        "Random background".to_string()
    }

    fn icon_name(&self) -> String {
        "preferences-desktop-wallpaper".to_string()
    }

    fn icon_pixmap(&self) -> Vec<ksni::Icon> {
        self.icon.iter().cloned().collect()
    }

    fn tool_tip(&self) -> ToolTip {
        ToolTip {
            title: "Change background randomly".to_string(),
            ..Default::default()
        }
    }

    fn menu(&self) -> Vec<MenuItem<Self>> {
        let mut items = vec![Self::action("Change background now", Command::Change)];

        if self.interval.is_enabled() {
            items.push(
                StandardItem {
                    label: format!("Background will change every {}", self.interval),
                    enabled: false,
                    ..Default::default()
                }
                .into(),
            );
        }

        items.extend([
            Self::action("Edit config", Command::EditConfig),
            Self::action("Show backgrounds directory", Command::OpenDirectory),
            MenuItem::Separator,
            Self::action("Quit", Command::Quit),
        ]);
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ksni::Tray;

    fn labels(tray: &BackgroundTray) -> Vec<(String, bool)> {
        tray.menu()
            .into_iter()
            .filter_map(|item| match item {
                MenuItem::Standard(item) => Some((item.label, item.enabled)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_menu_without_interval() {
        let (tx, _rx) = mpsc::channel(4);
        let tray = BackgroundTray::new(tx, Interval::DISABLED);

        let labels: Vec<String> = labels(&tray).into_iter().map(|(l, _)| l).collect();
        assert_eq!(
            labels,
            vec![
                "Change background now",
                "Edit config",
                "Show backgrounds directory",
                "Quit"
            ]
        );
    }

    #[test]
    fn test_menu_shows_disabled_interval() {
        let (tx, _rx) = mpsc::channel(4);
        let tray = BackgroundTray::new(tx, "30m".parse().unwrap());

        let items = labels(&tray);
        assert_eq!(
            items[1],
            ("Background will change every 30m0s".to_string(), false)
        );
        assert!(items[0].1, "actions stay enabled");
    }

    #[test]
    fn test_menu_actions_send_commands() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut tray = BackgroundTray::new(tx, Interval::DISABLED);

        for item in tray.menu() {
            if let MenuItem::Standard(item) = item {
                (item.activate)(&mut tray);
            }
        }

        let mut received = Vec::new();
        while let Ok(cmd) = rx.try_recv() {
            received.push(cmd);
        }
        assert_eq!(
            received,
            vec![
                Command::Change,
                Command::EditConfig,
                Command::OpenDirectory,
                Command::Quit
            ]
        );
    }

    #[test]
    fn test_full_channel_does_not_panic() {
        let (tx, _rx) = mpsc::channel(1);
        let tray = BackgroundTray::new(tx, Interval::DISABLED);
        tray.send(Command::Change);
        tray.send(Command::Change);
    }
}
