//! Integration test to fetch real data from OpenDota and verify responses.
//!
//! Run with: cargo test -p od-ingestion --test fetch_data -- --ignored --nocapture

use od_ingestion::{DataSource, OpenDotaSource};
use od_types::{oldest_match, AccountId};

// A long-lived public profile with a deep match history.
const TEST_ACCOUNT: u32 = 111620041;

// Community id that should normalize to the account above.
const TEST_STEAM_ID: &str = "76561198071885769";

fn source() -> OpenDotaSource {
    // Surface retry and request logs with --nocapture.
    let _ = tracing_subscriber::fmt()
        .with_env_filter("od_ingestion=debug")
        .with_test_writer()
        .try_init();
    OpenDotaSource::from_env().expect("client config")
}

#[test]
fn test_steam_id_resolves_to_test_account() {
    let account = AccountId::resolve(TEST_STEAM_ID).unwrap();
    assert_eq!(account.get(), TEST_ACCOUNT);
}

#[tokio::test]
#[ignore] // Requires network access to the OpenDota API
async fn test_fetch_player() {
    println!("Fetching player...");
    let source = source();

    match source.get_player(AccountId::new(TEST_ACCOUNT)).await {
        Ok(player) => {
            println!("   Success!");
            println!("   Exists: {}", player.exists());
            if let Some(profile) = &player.profile {
                println!("   Name: {}", profile.display_name());
            }
            if let Some(rank) = player.rank() {
                println!("   Rank: {} {}", rank.medal_name(), rank.stars());
            }
            assert!(player.exists());
        }
        Err(e) => {
            panic!("Failed to fetch player: {}", e);
        }
    }
}

#[tokio::test]
#[ignore] // Requires network access to the OpenDota API
async fn test_fetch_win_loss() {
    println!("Fetching win/loss...");
    let source = source();

    match source.get_win_loss(AccountId::new(TEST_ACCOUNT)).await {
        Ok(wl) => {
            println!("   Success! {} wins / {} losses", wl.win, wl.lose);
            println!("   Win rate: {:.1}%", wl.win_rate());
            assert!(wl.total() > 0);
        }
        Err(e) => {
            panic!("Failed to fetch win/loss: {}", e);
        }
    }
}

#[tokio::test]
#[ignore] // Requires network access to the OpenDota API
async fn test_fetch_match_page() {
    println!("Fetching one page of matches...");
    let source = source();

    match source.get_matches(AccountId::new(TEST_ACCOUNT), 20, 0).await {
        Ok(matches) => {
            println!("   Success! Got {} matches.", matches.len());
            for m in matches.iter().take(5) {
                println!(
                    "     - {} hero {} {}/{}/{} win={}",
                    m.match_id, m.hero_id, m.kills, m.deaths, m.assists, m.is_win()
                );
            }

            if let Some(oldest) = oldest_match(&matches) {
                println!("   Oldest in page: {:?}", oldest.started_at());
            }
            assert!(matches.len() <= 20);
        }
        Err(e) => {
            panic!("Failed to fetch matches: {}", e);
        }
    }
}

#[tokio::test]
#[ignore] // Requires network access to the OpenDota API
async fn test_fetch_far_offset_is_empty() {
    let source = source();
    let matches = source
        .get_matches(AccountId::new(TEST_ACCOUNT), 100, 5_000_000)
        .await
        .expect("far offset should still succeed");
    assert!(matches.is_empty());
}

#[tokio::test]
#[ignore] // Requires network access to the OpenDota API
async fn test_fetch_unknown_account_is_not_found() {
    let source = source();
    // Account ids this large are never assigned.
    let result = source.get_player(AccountId::new(4_000_000_000)).await;

    match result {
        Ok(player) => assert!(!player.exists()),
        Err(e) => {
            println!("   Error: {}", e);
            assert!(e.is_not_found());
        }
    }
}

#[tokio::test]
#[ignore] // Requires network access to the OpenDota API
async fn test_fetch_leaderboards() {
    let source = source();

    let top = source.get_top_players().await.expect("top players");
    println!("   Top players: {}", top.len());

    let pros = source.get_pro_players().await.expect("pro players");
    println!("   Pro players: {}", pros.len());
    if let Some(pro) = pros.first() {
        println!("   First pro: {}", pro.display_name());
    }
    assert!(!pros.is_empty());
}
