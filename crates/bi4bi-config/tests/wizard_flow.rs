// End-to-end wizard walkthrough: navigation state machine + credential
// store, exactly the sequence an operator follows on first setup.

use bi4bi_config::{CredentialRecord, CredentialStore};
use bi4bi_core::{NavigationState, ScreenId, find_tool};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

#[test]
fn first_time_setup_flow() {
    let dir = TempDir::new().expect("tempdir");
    let store = CredentialStore::new(dir.path().join("credentials.csv"));
    let mut nav = NavigationState::default();

    // Landing screen → Begin
    assert_eq!(nav.current(), ScreenId::Home);
    nav.begin();
    assert_eq!(nav.current(), ScreenId::ChooseTool);

    // Power BI has no adapter: notice, stay on the grid
    nav.select_tool(find_tool("Power BI").expect("catalog"));
    assert_eq!(nav.current(), ScreenId::ChooseTool);
    assert_eq!(nav.take_notice().as_deref(), Some("Power BI"));

    // Tableau has one: move to Configure
    nav.select_tool(find_tool("Tableau").expect("catalog"));
    assert_eq!(nav.current(), ScreenId::Configure);
    assert_eq!(nav.selected_tool(), Some("Tableau"));

    // Fill the form and save
    let record = CredentialRecord {
        server: "srv1".into(),
        token_name: "tk".into(),
        token_secret: "sec".into(),
        ..CredentialRecord::default()
    };
    store.save(&record).expect("save");

    // Re-entering the form loads exactly what was saved, with the API
    // version defaulted.
    let loaded = store.load();
    assert_eq!(loaded.server, "srv1");
    assert_eq!(loaded.token_name, "tk");
    assert_eq!(loaded.token_secret, "sec");
    assert_eq!(loaded.api_version, "3.17");
    assert_eq!(loaded.site_name, "");
}
