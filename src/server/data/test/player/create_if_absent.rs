use super::*;
use crate::server::model::player::DEFAULT_PLAYER_ROLE;

/// Tests registering a player that does not exist yet.
///
/// Verifies that the row is inserted with the store's default role and that the call
/// reports the insert.
///
/// Expected: Ok with created flag set and canonical record returned
#[tokio::test]
async fn creates_new_player() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Player)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = PlayerRepository::new(db);
    let (player, created) = repo
        .create_if_absent(create_param("76561198000000000", "Alice"))
        .await?;

    assert!(created);
    assert_eq!(player.player_id, "76561198000000000");
    assert_eq!(player.name, "Alice");
    assert_eq!(player.country_code.as_deref(), Some("US"));
    assert_eq!(player.role, DEFAULT_PLAYER_ROLE);

    let avatar = repo.find_avatar("76561198000000000").await?;
    assert_eq!(avatar, Some(vec![1, 2, 3]));

    Ok(())
}

/// Tests registering an id that is already stored.
///
/// Verifies that the existing row is returned untouched and the call reports that nothing
/// was inserted.
///
/// Expected: Ok with created flag unset and original name and role preserved
#[tokio::test]
async fn keeps_existing_player() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Player)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::player::PlayerFactory::new(db)
        .player_id("76561198000000000")
        .name("Original")
        .role("Admin")
        .build()
        .await?;

    let repo = PlayerRepository::new(db);
    let (player, created) = repo
        .create_if_absent(create_param("76561198000000000", "Renamed"))
        .await?;

    assert!(!created);
    assert_eq!(player.name, "Original");
    assert_eq!(player.role, "Admin");
    assert!(player.country_code.is_none());

    Ok(())
}

/// Tests registering the same id twice in a row.
///
/// Expected: exactly one of the calls reports the insert and a single row remains
#[tokio::test]
async fn only_first_registration_reports_creation() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Player)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = PlayerRepository::new(db);
    let (_, first) = repo
        .create_if_absent(create_param("76561198000000000", "Alice"))
        .await?;
    let (_, second) = repo
        .create_if_absent(create_param("76561198000000000", "Alice"))
        .await?;

    assert!(first);
    assert!(!second);
    assert_eq!(repo.search(None).await?.len(), 1);

    Ok(())
}
