pub mod composer;
pub mod floating_hearts;
pub mod music_player;
pub mod notices;
pub mod sticky_note;
