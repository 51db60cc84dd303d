pub mod steam_id;
