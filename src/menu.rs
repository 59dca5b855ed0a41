//! Reaction menus: a posted message, its icons, and the action bound to each.
//!
//! A [`PendingMenu`] waits for exactly one qualifying reaction (right
//! message, requesting user, known icon) and resolves to its action, or
//! expires at a deadline fixed when the menu was posted. Anything else is
//! ignored without moving the deadline.

use futures::{Stream, StreamExt};
use std::time::Duration;
use tokio::time::Instant;

/// Longest a menu may wait. Discord interaction tokens expire after 15
/// minutes.
pub const MAX_MENU_TIMEOUT: Duration = Duration::from_secs(900);

/// Icons for choosing one of five suggested dishes
pub const INDEX_ICONS: [&str; 5] = ["1️⃣", "2️⃣", "3️⃣", "4️⃣", "5️⃣"];

/// Icons for acting on a posted recipe
pub const OPTION_ICONS: [&str; 3] = ["💾", "⭐", "♥️"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Show the recipe for the suggestion at this zero-based index
    ShowSuggestion(usize),
    Save,
    Favorite,
    Like,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    bindings: Vec<(&'static str, MenuAction)>,
}

impl Menu {
    /// 1️⃣ to 5️⃣, bound to suggestion indexes 0 to 4
    pub fn suggestions() -> Self {
        Menu {
            bindings: INDEX_ICONS
                .iter()
                .enumerate()
                .map(|(i, icon)| (*icon, MenuAction::ShowSuggestion(i)))
                .collect(),
        }
    }

    /// 💾 ⭐ ♥️, bound to save, favorite and like
    pub fn recipe_options() -> Self {
        Menu {
            bindings: OPTION_ICONS
                .iter()
                .copied()
                .zip([MenuAction::Save, MenuAction::Favorite, MenuAction::Like])
                .collect(),
        }
    }

    /// Icons in the order they should be attached to the message
    pub fn icons(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.bindings.iter().map(|(icon, _)| *icon)
    }

    pub fn action_for(&self, emoji: &str) -> Option<MenuAction> {
        let emoji = normalize_emoji(emoji);
        self.bindings
            .iter()
            .find(|(icon, _)| normalize_emoji(icon) == emoji)
            .map(|(_, action)| *action)
    }
}

/// Drop variation selectors so "♥️" and "♥" compare equal
fn normalize_emoji(emoji: &str) -> String {
    emoji.chars().filter(|c| *c != '\u{fe0f}').collect()
}

/// A reaction added to some message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionEvent {
    pub message_id: u64,
    pub user_id: u64,
    pub emoji: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOutcome {
    Resolved(MenuAction),
    Expired,
}

#[derive(Debug, Clone)]
pub struct PendingMenu {
    pub message_id: u64,
    pub menu: Menu,
    pub requester_id: u64,
    pub expires_at: Instant,
}

impl PendingMenu {
    /// A menu posted now that expires after `timeout`, capped at
    /// [`MAX_MENU_TIMEOUT`]
    pub fn new(message_id: u64, menu: Menu, requester_id: u64, timeout: Duration) -> Self {
        PendingMenu {
            message_id,
            menu,
            requester_id,
            expires_at: Instant::now() + timeout.min(MAX_MENU_TIMEOUT),
        }
    }

    /// The action this event selects, if it qualifies
    pub fn qualify(&self, event: &ReactionEvent) -> Option<MenuAction> {
        if event.message_id != self.message_id || event.user_id != self.requester_id {
            return None;
        }
        self.menu.action_for(&event.emoji)
    }

    /// Wait for the first qualifying event. The stream is dropped once the
    /// menu resolves or expires; a stream that ends early means expiry.
    pub async fn wait<S>(&self, events: S) -> MenuOutcome
    where
        S: Stream<Item = ReactionEvent> + Unpin,
    {
        let mut events = events;
        let selection = async {
            while let Some(event) = events.next().await {
                if let Some(action) = self.qualify(&event) {
                    return Some(action);
                }
            }
            None
        };

        match tokio::time::timeout_at(self.expires_at, selection).await {
            Ok(Some(action)) => MenuOutcome::Resolved(action),
            Ok(None) | Err(_) => MenuOutcome::Expired,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::mpsc;

    const MESSAGE: u64 = 10;
    const REQUESTER: u64 = 42;
    const STRANGER: u64 = 7;

    fn event(user_id: u64, emoji: &str) -> ReactionEvent {
        ReactionEvent {
            message_id: MESSAGE,
            user_id,
            emoji: emoji.to_string(),
        }
    }

    fn pending(menu: Menu, timeout: Duration) -> PendingMenu {
        PendingMenu::new(MESSAGE, menu, REQUESTER, timeout)
    }

    #[test]
    fn test_menu_bindings() {
        let menu = Menu::suggestions();
        assert_eq!(menu.icons().count(), 5);
        assert_eq!(menu.action_for("3️⃣"), Some(MenuAction::ShowSuggestion(2)));
        assert_eq!(menu.action_for("💾"), None);

        let options = Menu::recipe_options();
        assert_eq!(options.icons().collect::<Vec<_>>(), OPTION_ICONS.to_vec());
        assert_eq!(options.action_for("💾"), Some(MenuAction::Save));
        assert_eq!(options.action_for("⭐"), Some(MenuAction::Favorite));
        // Discord may drop the variation selector
        assert_eq!(options.action_for("\u{2665}"), Some(MenuAction::Like));
    }

    #[test]
    fn test_qualify_requires_requester_message_and_icon() {
        let menu = pending(Menu::recipe_options(), Duration::from_secs(60));
        assert_eq!(menu.qualify(&event(REQUESTER, "⭐")), Some(MenuAction::Favorite));
        assert_eq!(menu.qualify(&event(STRANGER, "⭐")), None);
        assert_eq!(menu.qualify(&event(REQUESTER, "🍕")), None);

        let mut elsewhere = event(REQUESTER, "⭐");
        elsewhere.message_id = MESSAGE + 1;
        assert_eq!(menu.qualify(&elsewhere), None);
    }

    #[test]
    fn test_huge_timeout_is_capped() {
        let before = Instant::now();
        let menu = pending(Menu::suggestions(), Duration::from_secs(u64::MAX));
        assert!(menu.expires_at <= Instant::now() + MAX_MENU_TIMEOUT);
        assert!(menu.expires_at >= before + MAX_MENU_TIMEOUT);
    }

    #[tokio::test]
    async fn test_requester_reaction_resolves() {
        let menu = pending(Menu::suggestions(), Duration::from_secs(5));
        let events = futures::stream::iter(vec![
            event(STRANGER, "1️⃣"),
            event(REQUESTER, "🍕"),
            event(REQUESTER, "4️⃣"),
            event(REQUESTER, "5️⃣"),
        ]);

        assert_eq!(
            menu.wait(events).await,
            MenuOutcome::Resolved(MenuAction::ShowSuggestion(3))
        );
    }

    #[tokio::test]
    async fn test_stranger_reactions_never_resolve() {
        let menu = pending(Menu::recipe_options(), Duration::from_millis(100));
        let (tx, rx) = mpsc::unbounded();
        for icon in OPTION_ICONS {
            tx.unbounded_send(event(STRANGER, icon)).unwrap();
        }

        // Sender stays alive, so only the deadline can end the wait
        assert_eq!(menu.wait(rx).await, MenuOutcome::Expired);
        drop(tx);
    }

    #[tokio::test]
    async fn test_no_reaction_expires() {
        let started = Instant::now();
        let menu = pending(Menu::recipe_options(), Duration::from_millis(50));
        let outcome = menu.wait(futures::stream::pending::<ReactionEvent>()).await;

        assert_eq!(outcome, MenuOutcome::Expired);
        assert!(started.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_ignored_events_do_not_extend_deadline() {
        let menu = pending(Menu::recipe_options(), Duration::from_millis(150));
        let (tx, rx) = mpsc::unbounded();

        let noise = tokio::spawn(async move {
            for _ in 0..20 {
                if tx.unbounded_send(event(STRANGER, "💾")).is_err() {
                    break;
                }
                tokio::time::sleep(Duration::from_millis(20)).await;
            }
            tx
        });

        let started = Instant::now();
        assert_eq!(menu.wait(rx).await, MenuOutcome::Expired);
        assert!(started.elapsed() < Duration::from_millis(350));
        noise.abort();
    }

    #[tokio::test]
    async fn test_closed_stream_expires() {
        let menu = pending(Menu::recipe_options(), Duration::from_secs(60));
        let events = futures::stream::iter(vec![event(STRANGER, "💾")]);
        assert_eq!(menu.wait(events).await, MenuOutcome::Expired);
    }
}
