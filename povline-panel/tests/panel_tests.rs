//! Panel behavior against a mocked device

use std::time::Duration;

use mockito::{Matcher, Server, ServerGuard};
use povline_panel::{
    AssetListing, ControlPanel, DeleteOutcome, Effect, ImageAssetManager, Orientation,
    PanelConfig, PanelError, PlaybackState, SaveOutcome, SyncOutcome, UploadProgress,
};
use proptest::prelude::*;
use rstest::rstest;

const OK: &str = r#"{"success":true}"#;

const LISTING: &str = r#"{"images":[
    {"name":"sunset.bmp","width":64,"height":144,"size":27702,"format":"BMP"},
    {"name":"logo.565","width":32,"height":144,"size":9216,"format":"RGB565"}
],"freeSpace":1048576,"totalSpace":1441792}"#;

fn panel_for(server: &ServerGuard) -> ControlPanel {
    ControlPanel::new(PanelConfig::new(server.url()).with_effect_color("#FF00A0")).unwrap()
}

#[rstest]
#[case("a.bmp", 102_400, true)]
#[case("a.bmp", 102_401, false)]
#[case("a.BMP", 10, true)]
#[case("logo.Rgb", 10, true)]
#[case("frame.565", 10, true)]
#[case("photo.png", 10, false)]
fn test_upload_candidate_validation(#[case] name: &str, #[case] size: usize, #[case] ok: bool) {
    assert_eq!(ImageAssetManager::validate_candidate(name, size).is_ok(), ok);
}

proptest! {
    #[test]
    fn test_oversized_files_always_rejected(extra in 1usize..1_000_000) {
        let result = ImageAssetManager::validate_candidate("a.bmp", 102_400 + extra);
        prop_assert!(result.is_err());
    }
}

#[tokio::test]
async fn test_rejected_upload_makes_no_request() {
    let mut server = Server::new_async().await;
    let upload = server.mock("POST", "/api/upload").expect(0).create_async().await;
    let mut panel = panel_for(&server);

    let error = panel
        .images
        .upload("big.bmp", vec![0u8; 102_401])
        .await
        .unwrap_err();

    assert!(error.is_validation());
    assert_eq!(panel.images.upload_progress(), &UploadProgress::Idle);
    upload.assert_async().await;
}

#[tokio::test]
async fn test_upload_at_limit_then_listing_refreshes() {
    let mut server = Server::new_async().await;
    let upload = server
        .mock("POST", "/api/upload")
        .match_body(Matcher::Regex(r#"filename="edge.bmp""#.to_string()))
        .with_body(OK)
        .create_async()
        .await;
    let listing = server
        .mock("GET", "/api/images")
        .with_body(r#"{"images":[{"name":"edge.bmp","width":1,"height":144,"size":102400,"format":"BMP"}]}"#)
        .create_async()
        .await;
    let mut panel = panel_for(&server);

    panel.images.upload("edge.bmp", vec![0u8; 102_400]).await.unwrap();

    upload.assert_async().await;
    listing.assert_async().await;
    assert_eq!(
        panel.images.upload_progress(),
        &UploadProgress::Done { file_name: "edge.bmp".to_string() }
    );
    assert!(panel.images.listing().contains("edge.bmp"));
}

#[tokio::test]
async fn test_failed_upload_records_device_reason() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/upload")
        .with_status(500)
        .with_body(r#"{"error":"Not enough space"}"#)
        .create_async()
        .await;
    let mut panel = panel_for(&server);

    let error = panel.images.upload("a.rgb", vec![1, 2, 3]).await.unwrap_err();

    assert_eq!(error.notice_text(), "Not enough space");
    assert_eq!(
        panel.images.upload_progress(),
        &UploadProgress::Failed {
            file_name: "a.rgb".to_string(),
            reason: "Not enough space".to_string(),
        }
    );
}

#[tokio::test]
async fn test_play_without_selection_sends_nothing() {
    let mut server = Server::new_async().await;
    let play = server.mock("POST", "/api/play").expect(0).create_async().await;
    let panel = panel_for(&server);

    let error = panel.play().await.unwrap_err();

    assert!(matches!(error, PanelError::NoImageSelected));
    play.assert_async().await;
}

#[tokio::test]
async fn test_select_then_play_sends_selected_name() {
    let mut server = Server::new_async().await;
    let play = server
        .mock("POST", "/api/play")
        .match_body(Matcher::Exact("image=sunset.bmp".to_string()))
        .with_body(OK)
        .create_async()
        .await;
    let mut panel = panel_for(&server);

    panel.images.select("sunset.bmp");
    panel.play().await.unwrap();

    play.assert_async().await;
}

#[tokio::test]
async fn test_delete_clears_selection_and_refreshes() {
    let mut server = Server::new_async().await;
    let delete = server
        .mock("POST", "/api/image/delete")
        .match_body(Matcher::UrlEncoded("image".to_string(), "sunset.bmp".to_string()))
        .with_body(OK)
        .create_async()
        .await;
    server
        .mock("GET", "/api/images")
        .with_body(r#"{"images":[]}"#)
        .create_async()
        .await;
    let mut panel = panel_for(&server);
    panel.images.select("sunset.bmp");

    let outcome = panel.images.delete("sunset.bmp", |_| true).await.unwrap();

    assert_eq!(outcome, DeleteOutcome::Deleted);
    assert_eq!(panel.images.selected(), None);
    assert_eq!(panel.images.listing(), &AssetListing::Empty);
    delete.assert_async().await;
}

#[tokio::test]
async fn test_failed_delete_keeps_selection() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/image/delete")
        .with_status(500)
        .with_body(r#"{"error":"Failed to delete image"}"#)
        .create_async()
        .await;
    let mut panel = panel_for(&server);
    panel.images.select("sunset.bmp");

    let error = panel.images.delete("sunset.bmp", |_| true).await.unwrap_err();

    assert_eq!(error.notice_text(), "Failed to delete image");
    assert_eq!(panel.images.selected(), Some("sunset.bmp"));
}

#[tokio::test]
async fn test_solid_effect_sends_configured_color() {
    let mut server = Server::new_async().await;
    let effect = server
        .mock("POST", "/api/effect")
        .match_body(Matcher::Exact("effect=solid&r=255&g=0&b=160".to_string()))
        .with_body(OK)
        .create_async()
        .await;
    let mut panel = panel_for(&server);

    panel.effects.apply(Effect::Solid).await.unwrap();

    effect.assert_async().await;
    assert_eq!(panel.effects.current(), &Effect::Solid);
    assert!(panel.effects.uses_color());
}

#[tokio::test]
async fn test_none_effect_sends_name_only() {
    let mut server = Server::new_async().await;
    let effect = server
        .mock("POST", "/api/effect")
        .match_body(Matcher::Exact("effect=none".to_string()))
        .with_body(OK)
        .create_async()
        .await;
    let mut panel = panel_for(&server);

    panel.effects.apply("none").await.unwrap();

    effect.assert_async().await;
    assert_eq!(panel.effects.current(), &Effect::None);
}

#[tokio::test]
async fn test_malformed_color_sends_nothing() {
    let mut server = Server::new_async().await;
    let effect = server.mock("POST", "/api/effect").expect(0).create_async().await;
    let config = PanelConfig::new(server.url()).with_effect_color("#GG0000");
    let mut panel = ControlPanel::new(config).unwrap();

    let error = panel.effects.apply(Effect::Chase).await.unwrap_err();

    assert!(error.is_validation());
    assert_eq!(panel.effects.current(), &Effect::None);
    effect.assert_async().await;
}

#[tokio::test]
async fn test_each_setting_sends_only_its_field() {
    let mut server = Server::new_async().await;
    let speed = server
        .mock("POST", "/api/settings")
        .match_body(Matcher::Exact("speed=120".to_string()))
        .with_body(OK)
        .create_async()
        .await;
    let orientation = server
        .mock("POST", "/api/settings")
        .match_body(Matcher::Exact("orientation=horizontal".to_string()))
        .with_body(OK)
        .create_async()
        .await;
    let mut panel = panel_for(&server);

    assert_eq!(panel.settings.set_speed(500).await, SyncOutcome::Acknowledged);
    assert_eq!(
        panel.settings.set_orientation(Orientation::Horizontal).await,
        SyncOutcome::Acknowledged
    );

    speed.assert_async().await;
    orientation.assert_async().await;
    assert_eq!(panel.settings.view().speed, 120);
}

#[tokio::test]
async fn test_rejected_setting_keeps_local_value() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/settings")
        .with_status(400)
        .with_body(r#"{"error":"Brightness out of range"}"#)
        .create_async()
        .await;
    let mut panel = panel_for(&server);

    let outcome = panel.settings.set_brightness(255).await;

    assert!(matches!(outcome, SyncOutcome::Diverged(_)));
    assert_eq!(panel.settings.view().brightness, 255);
}

#[tokio::test]
async fn test_config_round_trip_with_password() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/config")
        .with_body(
            r#"{"deviceName":"POV-Line","numLeds":144,"wifiSSID":"home","mqttEnabled":false,
                "mqttBroker":"","mqttPort":1883}"#,
        )
        .create_async()
        .await;
    let save = server
        .mock("POST", "/api/config")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("deviceName".to_string(), "Hall display".to_string()),
            Matcher::UrlEncoded("numLeds".to_string(), "72".to_string()),
            Matcher::UrlEncoded("wifiSSID".to_string(), "home".to_string()),
            Matcher::UrlEncoded("wifiPassword".to_string(), "hunter22".to_string()),
            Matcher::UrlEncoded("mqttEnabled".to_string(), "true".to_string()),
            Matcher::UrlEncoded("mqttBroker".to_string(), "10.0.0.2".to_string()),
            Matcher::UrlEncoded("mqttPort".to_string(), "1883".to_string()),
        ]))
        .with_body(OK)
        .create_async()
        .await;
    let mut panel = panel_for(&server);

    panel.device_config.load().await.unwrap();
    let mut draft = panel.device_config.draft().unwrap();
    draft.device_name = "Hall display".to_string();
    draft.num_leds = 72;
    draft.wifi_password = "hunter22".to_string();
    draft.mqtt_enabled = true;
    draft.mqtt_broker = "10.0.0.2".to_string();

    let outcome = panel.device_config.save(draft).await.unwrap();

    assert_eq!(outcome, SaveOutcome::RestartPending);
    assert!(panel.device_config.restart_pending());
    assert_eq!(panel.device_config.config().unwrap().num_leds, 72);
    save.assert_async().await;

    panel.device_config.acknowledge_restart();
    assert!(!panel.device_config.restart_pending());
}

#[tokio::test]
async fn test_empty_draft_password_is_sent_blank() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/config")
        .with_body(r#"{"deviceName":"POV-Line","wifiSSID":"home"}"#)
        .create_async()
        .await;
    let save = server
        .mock("POST", "/api/config")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("wifiSSID".to_string(), "home".to_string()),
            Matcher::UrlEncoded("wifiPassword".to_string(), String::new()),
        ]))
        .with_body(OK)
        .expect(1)
        .create_async()
        .await;
    let mut panel = panel_for(&server);

    panel.device_config.load().await.unwrap();
    let draft = panel.device_config.draft().unwrap();
    assert!(draft.wifi_password.is_empty());

    panel.device_config.save(draft).await.unwrap();
    save.assert_async().await;
}

#[tokio::test]
async fn test_start_loads_everything_and_polls() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/status")
        .with_body(
            r#"{"state":"playing","image":"sunset.bmp","column":3,"totalColumns":64,
                "speed":45,"brightness":128,"loopMode":false,"orientation":"horizontal"}"#,
        )
        .expect_at_least(2)
        .create_async()
        .await;
    server
        .mock("GET", "/api/images")
        .with_body(LISTING)
        .create_async()
        .await;
    server
        .mock("GET", "/api/config")
        .with_body(r#"{"deviceName":"POV-Line"}"#)
        .create_async()
        .await;

    let config = PanelConfig::new(server.url()).with_poll_interval(Duration::from_millis(100));
    let mut panel = ControlPanel::new(config).unwrap();
    panel.start().await.unwrap();

    assert!(panel.is_polling());
    let status = panel.status().unwrap();
    assert_eq!(status.state, PlaybackState::Playing);
    assert_eq!(status.column_label(), "3/64");

    let settings = panel.settings.view();
    assert_eq!(settings.speed, 45);
    assert_eq!(settings.brightness, 128);
    assert!(!settings.loop_mode);
    assert_eq!(settings.orientation, Orientation::Horizontal);

    assert_eq!(panel.images.listing().names(), vec!["sunset.bmp", "logo.565"]);
    assert_eq!(panel.images.storage().free, Some(1_048_576));
    assert_eq!(panel.device_config.config().unwrap().device_name, "POV-Line");

    let mut watcher = panel.watch_status();
    tokio::time::timeout(Duration::from_secs(2), watcher.changed())
        .await
        .expect("a scheduled poll should publish")
        .unwrap();

    panel.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_settings_seed_from_first_successful_poll() {
    let mut server = Server::new_async().await;
    let unavailable = server
        .mock("GET", "/api/status")
        .with_status(503)
        .create_async()
        .await;
    let config = PanelConfig::new(server.url()).with_poll_interval(Duration::from_millis(100));
    let mut panel = ControlPanel::new(config).unwrap();
    let mut watcher = panel.watch_status();

    panel.start().await.unwrap();
    assert!(panel.status().is_none());
    assert_eq!(panel.settings.view().speed, 30);

    unavailable.remove_async().await;
    server
        .mock("GET", "/api/status")
        .with_body(r#"{"state":"idle","speed":90,"brightness":200,"loopMode":false,"orientation":"horizontal"}"#)
        .create_async()
        .await;
    tokio::time::timeout(Duration::from_secs(2), watcher.changed())
        .await
        .expect("a scheduled poll should publish")
        .unwrap();

    let settings = panel.settings.view();
    assert_eq!(settings.speed, 90);
    assert_eq!(settings.brightness, 200);
    assert!(!settings.loop_mode);
    assert_eq!(settings.orientation, Orientation::Horizontal);

    server
        .mock("POST", "/api/settings")
        .match_body(Matcher::Exact("speed=10".to_string()))
        .with_body(OK)
        .create_async()
        .await;
    assert!(panel.settings.set_speed(10).await.is_acknowledged());
    let settings = panel.settings.view();
    assert_eq!(settings.speed, 10);
    assert_eq!(settings.brightness, 200);
    assert_eq!(settings.orientation, Orientation::Horizontal);

    panel.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_start_survives_unreachable_device() {
    let mut panel = ControlPanel::new(
        PanelConfig::new("http://127.0.0.1:9").with_poll_interval(Duration::from_millis(100)),
    )
    .unwrap();

    panel.start().await.unwrap();

    assert!(panel.status().is_none());
    assert_eq!(panel.images.listing(), &AssetListing::NotLoaded);
    assert!(panel.device_config.config().is_none());
    panel.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_poll_failure_keeps_last_snapshot() {
    let mut server = Server::new_async().await;
    let first = server
        .mock("GET", "/api/status")
        .with_body(r#"{"state":"paused","image":"logo.565"}"#)
        .create_async()
        .await;
    let mut panel = panel_for(&server);

    panel.refresh_status().await.unwrap();
    first.remove_async().await;
    server
        .mock("GET", "/api/status")
        .with_status(500)
        .create_async()
        .await;

    let outcome = panel.refresh_status().await.unwrap();

    assert!(!outcome.is_updated());
    let status = panel.status().unwrap();
    assert_eq!(status.state, PlaybackState::Paused);
    assert_eq!(status.image, "logo.565");
}
