//! Keyboard activation for link-styled buttons.

/// True when `key` should click a focused element with tag `tag_name`.
///
/// Anchors styled as buttons (`<a class="btn">`) get button semantics:
/// Enter and Space both activate them.
pub fn activates_link(key: &str, tag_name: &str, is_button_styled: bool) -> bool {
    is_button_styled && tag_name.eq_ignore_ascii_case("a") && matches!(key, "Enter" | " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_and_space_activate_button_links() {
        assert!(activates_link("Enter", "A", true));
        assert!(activates_link(" ", "a", true));
    }

    #[test]
    fn other_keys_do_not_activate() {
        assert!(!activates_link("Tab", "A", true));
        assert!(!activates_link("Spacebar", "A", true));
    }

    #[test]
    fn plain_links_and_real_buttons_are_left_alone() {
        assert!(!activates_link("Enter", "A", false));
        assert!(!activates_link(" ", "BUTTON", true));
    }
}
