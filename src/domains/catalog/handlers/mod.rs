pub mod game_handler;
