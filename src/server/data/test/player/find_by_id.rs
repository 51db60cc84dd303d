use super::*;

/// Tests finding an existing player by SteamID64.
///
/// Expected: Ok(Some(Player)) with matching data
#[tokio::test]
async fn finds_existing_player() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Player)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::player::PlayerFactory::new(db)
        .player_id("76561198000000000")
        .name("Alice")
        .country_code(Some("SE"))
        .build()
        .await?;

    let repo = PlayerRepository::new(db);
    let player = repo.find_by_id("76561198000000000").await?;

    let player = player.expect("player should exist");
    assert_eq!(player.player_id, "76561198000000000");
    assert_eq!(player.name, "Alice");
    assert_eq!(player.country_code.as_deref(), Some("SE"));
    assert_eq!(player.role, "Player");

    Ok(())
}

/// Tests querying for a player that was never created.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_nonexistent_player() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Player)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_player(db).await?;

    let repo = PlayerRepository::new(db);
    let result = repo.find_by_id("76561198999999999").await?;

    assert!(result.is_none());

    Ok(())
}

/// Tests that every column of the projection lands in the matching field.
///
/// Expected: Ok(Some(Player)) with distinct values mapped one to one, avatar left out
#[tokio::test]
async fn maps_every_column_without_avatar() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Player)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let stored = factory::player::PlayerFactory::new(db)
        .player_id("76561198000000001")
        .name("Bob")
        .country_code(Some("NO"))
        .role("Moderator")
        .avatar(Some(vec![0xAB; 4096]))
        .build()
        .await?;

    let player = PlayerRepository::new(db)
        .find_by_id("76561198000000001")
        .await?
        .unwrap();

    assert_eq!(player.player_id, "76561198000000001");
    assert_eq!(player.name, "Bob");
    assert_eq!(player.country_code.as_deref(), Some("NO"));
    assert_eq!(player.role, "Moderator");
    assert!((player.created_at - stored.created_at).num_seconds().abs() < 1);

    Ok(())
}
