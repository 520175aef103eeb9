pub const APP_NAME: &str = "seadex-table";

pub const DUAL_AUDIO_SUFFIX: &str = " (Dual Audio)";

pub mod seadex {

    pub const API_URL: &str = "https://releases.moe/api/collections";

    pub const TITLE_MAPPING_URL: &str =
        "https://raw.githubusercontent.com/anime-and-manga/lists/refs/heads/main/anime-full.json";

    pub const USER_AGENT: &str = "seadex-table/0.1";

    pub const NYAA_TRACKER: &str = "nyaa";
}

pub mod paths {

    pub const DATA_FILE: &str = "releases.json";

    pub const OUTPUT_FILE: &str = "index.html";
}

pub mod page {

    pub const DEFAULT_TITLE: &str = "SeaDex Release Comparison";

    pub const HEADERS: [&str; 6] = [
        "Title",
        "Alt Title",
        "Best Release",
        "Alt Release",
        "Comparison",
        "Notes",
    ];
}
