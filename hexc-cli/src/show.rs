//! Show command - print the standard starting layout

use hexc_core::render::render_with_caption;
use hexc_core::Game;

pub fn run() {
    let game = Game::new();
    print!("{}", render_with_caption(game.board(), game.status()));
}
