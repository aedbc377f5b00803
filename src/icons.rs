//! Social icon lookup.
//!
//! Maps a social link `type` to a Font Awesome 5 class string. The tables
//! below are compiled in and kept sorted so lookup is a binary search.
//! Solid names are checked before brand names; anything unknown gets the
//! generic link glyph.
//!
//! `BRANDS` is the whole free brand set of Font Awesome 5.15. `SOLID` only
//! carries the solid icons that can stand for a profile or contact; UI
//! glyphs like arrows are left out.

use log::warn;

/// Class for types with no matching icon.
pub const FALLBACK_ICON: &str = "fas fa-link";

const SOLID: &[&str] = &[
    "address-book",
    "address-card",
    "ambulance",
    "anchor",
    "archive",
    "at",
    "atom",
    "award",
    "baby",
    "balance-scale",
    "barcode",
    "basketball-ball",
    "bell",
    "bicycle",
    "blog",
    "bolt",
    "book",
    "book-dead",
    "book-open",
    "book-reader",
    "bookmark",
    "box",
    "brain",
    "briefcase",
    "broadcast-tower",
    "bug",
    "building",
    "bullhorn",
    "bus",
    "calendar",
    "calendar-alt",
    "camera",
    "camera-retro",
    "car",
    "car-side",
    "cat",
    "certificate",
    "chalkboard",
    "chalkboard-teacher",
    "chart-bar",
    "check",
    "check-circle",
    "chess",
    "child",
    "city",
    "clock",
    "cloud",
    "cloud-download-alt",
    "cloud-upload-alt",
    "code",
    "code-branch",
    "coffee",
    "cog",
    "cogs",
    "comment",
    "comment-alt",
    "comment-dots",
    "comments",
    "compact-disc",
    "compass",
    "credit-card",
    "crown",
    "database",
    "desktop",
    "dice",
    "dna",
    "dog",
    "donate",
    "dove",
    "download",
    "drafting-compass",
    "dragon",
    "drum",
    "dumbbell",
    "envelope",
    "envelope-open",
    "envelope-square",
    "ethernet",
    "external-link-alt",
    "external-link-square-alt",
    "fax",
    "feather",
    "feather-alt",
    "female",
    "file",
    "file-alt",
    "file-archive",
    "file-audio",
    "file-code",
    "file-contract",
    "file-download",
    "file-excel",
    "file-image",
    "file-pdf",
    "file-powerpoint",
    "file-video",
    "file-word",
    "film",
    "fingerprint",
    "fire",
    "flag",
    "flask",
    "folder",
    "folder-open",
    "futbol",
    "gamepad",
    "gavel",
    "gem",
    "ghost",
    "gift",
    "globe",
    "globe-africa",
    "globe-americas",
    "globe-asia",
    "globe-europe",
    "graduation-cap",
    "grin",
    "guitar",
    "hammer",
    "hand-holding-heart",
    "hand-holding-usd",
    "hands-helping",
    "handshake",
    "hashtag",
    "hat-wizard",
    "hdd",
    "heading",
    "headphones",
    "heart",
    "heartbeat",
    "hiking",
    "home",
    "hospital",
    "hourglass",
    "id-badge",
    "id-card",
    "image",
    "images",
    "inbox",
    "industry",
    "infinity",
    "info-circle",
    "key",
    "keyboard",
    "language",
    "laptop",
    "laptop-code",
    "laugh",
    "leaf",
    "lightbulb",
    "link",
    "list",
    "list-ul",
    "location-arrow",
    "lock",
    "male",
    "map",
    "map-marked-alt",
    "map-marker-alt",
    "map-pin",
    "mask",
    "medal",
    "meteor",
    "microchip",
    "microphone",
    "microscope",
    "minus",
    "mobile-alt",
    "money-bill",
    "moon",
    "motorcycle",
    "mountain",
    "mouse",
    "mug-hot",
    "music",
    "network-wired",
    "newspaper",
    "paint-brush",
    "palette",
    "paper-plane",
    "paperclip",
    "passport",
    "paw",
    "pen",
    "pen-fancy",
    "pen-nib",
    "pencil-alt",
    "pencil-ruler",
    "people-carry",
    "phone",
    "phone-alt",
    "phone-square",
    "phone-square-alt",
    "photo-video",
    "piggy-bank",
    "plane",
    "play",
    "play-circle",
    "plus",
    "podcast",
    "portrait",
    "print",
    "puzzle-piece",
    "qrcode",
    "question-circle",
    "quote-left",
    "quote-right",
    "reply",
    "retweet",
    "road",
    "robot",
    "rocket",
    "route",
    "rss",
    "rss-square",
    "running",
    "satellite",
    "satellite-dish",
    "save",
    "school",
    "sd-card",
    "search",
    "seedling",
    "server",
    "share",
    "share-alt",
    "share-alt-square",
    "share-square",
    "shield-alt",
    "ship",
    "shopping-bag",
    "shopping-cart",
    "signal",
    "sitemap",
    "skull",
    "smile",
    "spa",
    "space-shuttle",
    "star",
    "stethoscope",
    "store",
    "store-alt",
    "sun",
    "tag",
    "tags",
    "tasks",
    "terminal",
    "thumbs-down",
    "thumbs-up",
    "ticket-alt",
    "times",
    "tools",
    "train",
    "tree",
    "trophy",
    "truck",
    "tv",
    "university",
    "unlink",
    "unlock",
    "upload",
    "user",
    "user-astronaut",
    "user-circle",
    "user-friends",
    "user-graduate",
    "user-secret",
    "user-tie",
    "users",
    "utensils",
    "vial",
    "video",
    "vote-yea",
    "wallet",
    "warehouse",
    "wifi",
    "wrench",
    "yin-yang",
];

const BRANDS: &[&str] = &[
    "500px",
    "accessible-icon",
    "accusoft",
    "acquisitions-incorporated",
    "adn",
    "adversal",
    "affiliatetheme",
    "airbnb",
    "algolia",
    "alipay",
    "amazon",
    "amazon-pay",
    "amilia",
    "android",
    "angellist",
    "angrycreative",
    "angular",
    "app-store",
    "app-store-ios",
    "apper",
    "apple",
    "apple-pay",
    "artstation",
    "asymmetrik",
    "atlassian",
    "audible",
    "autoprefixer",
    "avianex",
    "aviato",
    "aws",
    "bandcamp",
    "battle-net",
    "behance",
    "behance-square",
    "bimobject",
    "bitbucket",
    "bitcoin",
    "bity",
    "black-tie",
    "blackberry",
    "blogger",
    "blogger-b",
    "bluetooth",
    "bluetooth-b",
    "bootstrap",
    "btc",
    "buffer",
    "buromobelexperte",
    "buy-n-large",
    "buysellads",
    "canadian-maple-leaf",
    "cc-amazon-pay",
    "cc-amex",
    "cc-apple-pay",
    "cc-diners-club",
    "cc-discover",
    "cc-jcb",
    "cc-mastercard",
    "cc-paypal",
    "cc-stripe",
    "cc-visa",
    "centercode",
    "centos",
    "chrome",
    "chromecast",
    "cloudflare",
    "cloudscale",
    "cloudsmith",
    "cloudversify",
    "codepen",
    "codiepie",
    "confluence",
    "connectdevelop",
    "contao",
    "cotton-bureau",
    "cpanel",
    "creative-commons",
    "creative-commons-by",
    "creative-commons-nc",
    "creative-commons-nc-eu",
    "creative-commons-nc-jp",
    "creative-commons-nd",
    "creative-commons-pd",
    "creative-commons-pd-alt",
    "creative-commons-remix",
    "creative-commons-sa",
    "creative-commons-sampling",
    "creative-commons-sampling-plus",
    "creative-commons-share",
    "creative-commons-zero",
    "critical-role",
    "css3",
    "css3-alt",
    "cuttlefish",
    "d-and-d",
    "d-and-d-beyond",
    "dailymotion",
    "dashcube",
    "deezer",
    "delicious",
    "deploydog",
    "deskpro",
    "dev",
    "deviantart",
    "dhl",
    "diaspora",
    "digg",
    "digital-ocean",
    "discord",
    "discourse",
    "dochub",
    "docker",
    "draft2digital",
    "dribbble",
    "dribbble-square",
    "dropbox",
    "drupal",
    "dyalog",
    "earlybirds",
    "ebay",
    "edge",
    "edge-legacy",
    "elementor",
    "ello",
    "ember",
    "empire",
    "envira",
    "erlang",
    "ethereum",
    "etsy",
    "evernote",
    "expeditedssl",
    "facebook",
    "facebook-f",
    "facebook-messenger",
    "facebook-square",
    "fantasy-flight-games",
    "fedex",
    "fedora",
    "figma",
    "firefox",
    "firefox-browser",
    "first-order",
    "first-order-alt",
    "firstdraft",
    "flickr",
    "flipboard",
    "fly",
    "font-awesome",
    "font-awesome-alt",
    "font-awesome-flag",
    "fonticons",
    "fonticons-fi",
    "fort-awesome",
    "fort-awesome-alt",
    "forumbee",
    "foursquare",
    "free-code-camp",
    "freebsd",
    "fulcrum",
    "galactic-republic",
    "galactic-senate",
    "get-pocket",
    "gg",
    "gg-circle",
    "git",
    "git-alt",
    "git-square",
    "github",
    "github-alt",
    "github-square",
    "gitkraken",
    "gitlab",
    "gitter",
    "glide",
    "glide-g",
    "gofore",
    "goodreads",
    "goodreads-g",
    "google",
    "google-drive",
    "google-pay",
    "google-play",
    "google-plus",
    "google-plus-g",
    "google-plus-square",
    "google-wallet",
    "gratipay",
    "grav",
    "gripfire",
    "grunt",
    "guilded",
    "gulp",
    "hacker-news",
    "hacker-news-square",
    "hackerrank",
    "hips",
    "hire-a-helper",
    "hive",
    "hooli",
    "hornbill",
    "hotjar",
    "houzz",
    "html5",
    "hubspot",
    "ideal",
    "imdb",
    "innosoft",
    "instagram",
    "instagram-square",
    "instalod",
    "intercom",
    "internet-explorer",
    "invision",
    "ioxhost",
    "itch-io",
    "itunes",
    "itunes-note",
    "java",
    "jedi-order",
    "jenkins",
    "jira",
    "joget",
    "joomla",
    "js",
    "js-square",
    "jsfiddle",
    "kaggle",
    "keybase",
    "keycdn",
    "kickstarter",
    "kickstarter-k",
    "korvue",
    "laravel",
    "lastfm",
    "lastfm-square",
    "leanpub",
    "less",
    "line",
    "linkedin",
    "linkedin-in",
    "linode",
    "linux",
    "lyft",
    "magento",
    "mailchimp",
    "mandalorian",
    "markdown",
    "mastodon",
    "maxcdn",
    "mdb",
    "medapps",
    "medium",
    "medium-m",
    "medrt",
    "meetup",
    "megaport",
    "mendeley",
    "microblog",
    "microsoft",
    "mix",
    "mixcloud",
    "mixer",
    "mizuni",
    "modx",
    "monero",
    "napster",
    "neos",
    "nimblr",
    "node",
    "node-js",
    "npm",
    "ns8",
    "nutritionix",
    "octopus-deploy",
    "odnoklassniki",
    "odnoklassniki-square",
    "old-republic",
    "opencart",
    "openid",
    "opera",
    "optin-monster",
    "orcid",
    "osi",
    "page4",
    "pagelines",
    "palfed",
    "patreon",
    "paypal",
    "penny-arcade",
    "perbyte",
    "periscope",
    "phabricator",
    "phoenix-framework",
    "phoenix-squadron",
    "php",
    "pied-piper",
    "pied-piper-alt",
    "pied-piper-hat",
    "pied-piper-pp",
    "pied-piper-square",
    "pinterest",
    "pinterest-p",
    "pinterest-square",
    "playstation",
    "product-hunt",
    "pushed",
    "python",
    "qq",
    "quinscape",
    "quora",
    "r-project",
    "raspberry-pi",
    "ravelry",
    "react",
    "reacteurope",
    "readme",
    "rebel",
    "red-river",
    "reddit",
    "reddit-alien",
    "reddit-square",
    "redhat",
    "renren",
    "replyd",
    "researchgate",
    "resolving",
    "rev",
    "rocketchat",
    "rockrms",
    "rust",
    "safari",
    "salesforce",
    "sass",
    "schlix",
    "scribd",
    "searchengin",
    "sellcast",
    "sellsy",
    "servicestack",
    "shirtsinbulk",
    "shopify",
    "shopware",
    "simplybuilt",
    "sistrix",
    "sith",
    "sketch",
    "skyatlas",
    "skype",
    "slack",
    "slack-hash",
    "slideshare",
    "snapchat",
    "snapchat-ghost",
    "snapchat-square",
    "soundcloud",
    "sourcetree",
    "speakap",
    "speaker-deck",
    "spotify",
    "squarespace",
    "stack-exchange",
    "stack-overflow",
    "stackpath",
    "staylinked",
    "steam",
    "steam-square",
    "steam-symbol",
    "sticker-mule",
    "strava",
    "stripe",
    "stripe-s",
    "studiovinari",
    "stumbleupon",
    "stumbleupon-circle",
    "superpowers",
    "supple",
    "suse",
    "swift",
    "symfony",
    "teamspeak",
    "telegram",
    "telegram-plane",
    "tencent-weibo",
    "the-red-yeti",
    "themeco",
    "themeisle",
    "think-peaks",
    "tiktok",
    "trade-federation",
    "trello",
    "tripadvisor",
    "tumblr",
    "tumblr-square",
    "twitch",
    "twitter",
    "twitter-square",
    "typo3",
    "uber",
    "ubuntu",
    "uikit",
    "umbraco",
    "uncharted",
    "uniregistry",
    "unity",
    "unsplash",
    "untappd",
    "ups",
    "usb",
    "usps",
    "ussunnah",
    "vaadin",
    "viacoin",
    "viadeo",
    "viadeo-square",
    "viber",
    "vimeo",
    "vimeo-square",
    "vimeo-v",
    "vine",
    "vk",
    "vnv",
    "vuejs",
    "watchman-monitoring",
    "waze",
    "weebly",
    "weibo",
    "weixin",
    "whatsapp",
    "whatsapp-square",
    "whmcs",
    "wikipedia-w",
    "windows",
    "wix",
    "wizards-of-the-coast",
    "wodu",
    "wolf-pack-battalion",
    "wordpress",
    "wordpress-simple",
    "wpbeginner",
    "wpexplorer",
    "wpforms",
    "wpressr",
    "xbox",
    "xing",
    "xing-square",
    "y-combinator",
    "yahoo",
    "yammer",
    "yandex",
    "yandex-international",
    "yarn",
    "yelp",
    "yoast",
    "youtube",
    "youtube-square",
    "zhihu",
];

/// Resolve a social type name to a Font Awesome class string.
///
/// Never fails: unknown names resolve to [`FALLBACK_ICON`].
pub fn resolve_icon(type_name: &str) -> String {
    if SOLID.binary_search(&type_name).is_ok() {
        format!("fas fa-{type_name}")
    } else if BRANDS.binary_search(&type_name).is_ok() {
        format!("fab fa-{type_name}")
    } else {
        warn!("no icon for social type {type_name:?}, using {FALLBACK_ICON}");
        FALLBACK_ICON.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_are_sorted_and_unique() {
        for table in [SOLID, BRANDS] {
            assert!(table.windows(2).all(|w| w[0] < w[1]), "{table:?}");
        }
    }

    #[test]
    fn brand_icon() {
        assert_eq!(resolve_icon("github"), "fab fa-github");
        assert_eq!(resolve_icon("linkedin"), "fab fa-linkedin");
    }

    #[test]
    fn square_brand_variants() {
        assert_eq!(resolve_icon("github-square"), "fab fa-github-square");
        assert_eq!(resolve_icon("twitter-square"), "fab fa-twitter-square");
        assert_eq!(resolve_icon("stack-overflow"), "fab fa-stack-overflow");
    }

    #[test]
    fn solid_icon() {
        assert_eq!(resolve_icon("envelope"), "fas fa-envelope");
        assert_eq!(resolve_icon("rss"), "fas fa-rss");
        assert_eq!(resolve_icon("envelope-square"), "fas fa-envelope-square");
    }

    #[test]
    fn unknown_type_falls_back() {
        assert_eq!(resolve_icon("unknown-service"), "fas fa-link");
        assert_eq!(resolve_icon(""), "fas fa-link");
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(resolve_icon("GitHub"), FALLBACK_ICON);
    }
}
