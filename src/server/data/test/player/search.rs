use super::*;

/// Tests that search projects every stored player.
///
/// Expected: Ok with one entry per player mapping id to display name
#[tokio::test]
async fn returns_every_player() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Player)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let alice = factory::player::PlayerFactory::new(db)
        .name("Alice")
        .build()
        .await?;
    let bob = factory::player::PlayerFactory::new(db)
        .name("Bob")
        .build()
        .await?;

    let repo = PlayerRepository::new(db);
    let players = repo.search(None).await?;

    assert_eq!(players.len(), 2);
    assert_eq!(players.get(&alice.player_id).map(String::as_str), Some("Alice"));
    assert_eq!(players.get(&bob.player_id).map(String::as_str), Some("Bob"));

    Ok(())
}

/// Tests search on an empty table.
///
/// Expected: Ok with an empty mapping
#[tokio::test]
async fn returns_empty_mapping_without_players() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Player)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let players = PlayerRepository::new(db).search(None).await?;

    assert!(players.is_empty());

    Ok(())
}

/// Tests narrowing the search by a name fragment.
///
/// Expected: Ok with only players whose name contains the fragment
#[tokio::test]
async fn filters_by_name_fragment() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Player)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let alice = factory::player::PlayerFactory::new(db)
        .name("Alice")
        .build()
        .await?;
    factory::player::PlayerFactory::new(db)
        .name("Bob")
        .build()
        .await?;

    let players = PlayerRepository::new(db).search(Some("lic")).await?;

    assert_eq!(players.len(), 1);
    assert!(players.contains_key(&alice.player_id));

    Ok(())
}
