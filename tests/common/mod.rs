#![allow(dead_code)]

use drupalci::fs::mock::MockFileSystem;

pub const WS: &str = "/ws";

/// Empty workspace at `/ws`.
pub fn empty_workspace() -> MockFileSystem {
    let fs = MockFileSystem::new();
    fs.add_dir(WS);
    fs
}

/// Workspace whose `drupal/` already holds a git checkout of Drupal 7.
pub fn workspace_with_checkout() -> MockFileSystem {
    let fs = empty_workspace();
    fs.add_dir("/ws/drupal/.git");
    fs.add_file("/ws/drupal/includes/bootstrap.inc", "<?php");
    fs.add_file("/ws/drupal/index.php", "<?php");
    fs
}

/// `drush --yes --nocolor --root=/ws/drupal <rest>`
pub fn site_drush(rest: &str) -> String {
    format!("drush --yes --nocolor --root=/ws/drupal {rest}")
}
