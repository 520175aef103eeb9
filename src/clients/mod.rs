pub mod seadex;

pub use seadex::SeaDexClient;
