use crate::server::{data::player::PlayerRepository, model::player::CreatePlayerParam};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create_if_absent;
mod find_avatar;
mod find_by_id;
mod search;
mod set_country_code_if_absent;

fn create_param(player_id: &str, name: &str) -> CreatePlayerParam {
    CreatePlayerParam {
        player_id: player_id.to_string(),
        name: name.to_string(),
        country_code: Some("US".to_string()),
        avatar: vec![1, 2, 3],
    }
}
