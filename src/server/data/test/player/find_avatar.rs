use super::*;

/// Tests loading a stored avatar.
///
/// Expected: Ok(Some(bytes)) equal to the stored bytes
#[tokio::test]
async fn returns_stored_avatar() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Player)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let player = factory::player::PlayerFactory::new(db)
        .avatar(Some(vec![0xFF, 0xD8, 0x00]))
        .build()
        .await?;

    let avatar = PlayerRepository::new(db)
        .find_avatar(&player.player_id)
        .await?;

    assert_eq!(avatar, Some(vec![0xFF, 0xD8, 0x00]));

    Ok(())
}

/// Tests loading the avatar of an unknown player or one without an avatar.
///
/// Expected: Ok(None) in both cases
#[tokio::test]
async fn returns_none_without_avatar() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Player)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let player = factory::player::PlayerFactory::new(db)
        .avatar(None)
        .build()
        .await?;

    let repo = PlayerRepository::new(db);

    assert!(repo.find_avatar(&player.player_id).await?.is_none());
    assert!(repo.find_avatar("76561198999999999").await?.is_none());

    Ok(())
}
