use super::*;

/// Tests backfilling the country of a player registered without one.
///
/// Expected: Ok(true) and the country is persisted
#[tokio::test]
async fn sets_missing_country_code() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Player)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let player = factory::create_player(db).await?;

    let repo = PlayerRepository::new(db);
    let updated = repo
        .set_country_code_if_absent(&player.player_id, "DE")
        .await?;

    assert!(updated);
    let stored = repo.find_by_id(&player.player_id).await?.unwrap();
    assert_eq!(stored.country_code.as_deref(), Some("DE"));

    Ok(())
}

/// Tests that an existing country code is never overwritten.
///
/// Expected: Ok(false) and the original country is kept
#[tokio::test]
async fn keeps_existing_country_code() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Player)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let player = factory::player::PlayerFactory::new(db)
        .country_code(Some("US"))
        .build()
        .await?;

    let repo = PlayerRepository::new(db);
    let updated = repo
        .set_country_code_if_absent(&player.player_id, "DE")
        .await?;

    assert!(!updated);
    let stored = repo.find_by_id(&player.player_id).await?.unwrap();
    assert_eq!(stored.country_code.as_deref(), Some("US"));

    Ok(())
}
