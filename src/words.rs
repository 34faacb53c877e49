//! Word source and scrambler

use rand::seq::SliceRandom;
use rand::Rng;
use std::path::Path;

/// Shortest word that is still worth scrambling
pub const MIN_WORD_LEN: usize = 4;
/// Longest word before unscrambling stops being fun
pub const MAX_WORD_LEN: usize = 7;

#[derive(Debug, thiserror::Error)]
pub enum WordListError {
    #[error("dictionary has no words of 4-7 lowercase letters")]
    Empty,

    #[error("failed to read dictionary {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Filtered dictionary of playable words
#[derive(Debug, Clone)]
pub struct WordList {
    words: Vec<String>,
}

/// Whether a dictionary entry can be used as an answer
pub fn is_playable(word: &str) -> bool {
    (MIN_WORD_LEN..=MAX_WORD_LEN).contains(&word.len())
        && word.bytes().all(|b| b.is_ascii_lowercase())
}

impl WordList {
    /// Build from raw entries, keeping only playable words
    pub fn new<I, S>(entries: I) -> Result<Self, WordListError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: Vec<String> = entries
            .into_iter()
            .filter(|w| is_playable(w.as_ref()))
            .map(|w| w.as_ref().to_string())
            .collect();

        if words.is_empty() {
            return Err(WordListError::Empty);
        }
        Ok(Self { words })
    }

    /// The embedded dictionary
    pub fn builtin() -> Result<Self, WordListError> {
        Self::new(BUILTIN_WORDS.iter())
    }

    /// Load a newline-delimited dictionary file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, WordListError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| WordListError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::new(contents.lines().map(str::trim))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    /// Pick a word uniformly at random
    pub fn pick_word(&self) -> &str {
        self.pick_word_with(&mut rand::rng())
    }

    pub fn pick_word_with<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        // Non-empty by construction
        &self.words[rng.random_range(0..self.words.len())]
    }
}

/// Shuffle the characters of `word`. The result may equal the input.
pub fn scramble(word: &str) -> String {
    scramble_with(word, &mut rand::rng())
}

pub fn scramble_with<R: Rng + ?Sized>(word: &str, rng: &mut R) -> String {
    let mut chars: Vec<char> = word.chars().collect();
    chars.shuffle(rng);
    chars.into_iter().collect()
}

const BUILTIN_WORDS: &[&str] = &[
    "able", "about", "above", "absent", "absorb", "accent", "accept", "access", "account",
    "acid", "across", "action", "active", "actor", "adapt", "admit", "adult", "advice",
    "afraid", "after", "again", "agent", "agree", "ahead", "alarm", "album", "alert", "alike",
    "alive", "allow", "almost", "alone", "along", "amber", "amount", "anchor", "angel",
    "anger", "angle", "animal", "ankle", "answer", "anyone", "apple", "april", "arena",
    "argue", "arise", "armor", "army", "around", "arrive", "arrow", "artist", "aside",
    "asleep", "aspect", "assume", "attack", "attend", "august", "author", "autumn", "avoid",
    "awake", "award", "aware", "awful", "baby", "back", "bacon", "badge", "bake", "balance",
    "ball", "banana", "band", "bank", "barrel", "basic", "basket", "battle", "beach", "bean",
    "bear", "beauty", "become", "bedroom", "before", "begin", "behind", "being", "believe",
    "bell", "belong", "below", "bench", "berry", "better", "beyond", "bicycle", "bird",
    "birth", "bitter", "black", "blade", "blame", "blank", "blast", "blind", "block", "blood",
    "bloom", "blue", "board", "boat", "body", "bold", "bone", "bonus", "book", "border",
    "bottle", "bottom", "bounce", "brain", "branch", "brave", "bread", "break", "breeze",
    "brick", "bridge", "brief", "bright", "bring", "broken", "bronze", "brother", "brown",
    "brush", "bubble", "bucket", "budget", "build", "bullet", "bundle", "burden", "butter",
    "button", "cabin", "cable", "cactus", "cake", "camel", "camera", "camp", "canal", "candle",
    "candy", "canvas", "canyon", "carbon", "card", "cargo", "carpet", "carrot", "castle",
    "catch", "cause", "cave", "cereal", "chain", "chair", "chalk", "change", "chaos", "charge",
    "chase", "cheap", "check", "cheese", "cherry", "chest", "chicken", "chief", "child",
    "choice", "circle", "citizen", "city", "claim", "clap", "class", "clay", "clean", "clerk",
    "clever", "click", "client", "cliff", "climb", "clinic", "clock", "close", "cloth",
    "cloud", "clown", "coach", "coast", "coconut", "coffee", "coin", "color", "column",
    "combine", "comfort", "comic", "common", "copper", "coral", "core", "corner", "cotton",
    "couch", "country", "couple", "course", "cousin", "cover", "coyote", "crack", "cradle",
    "craft", "crane", "crash", "crater", "cream", "credit", "creek", "crew", "cricket",
    "crime", "crisp", "crop", "cross", "crowd", "crown", "cruel", "cruise", "crumble",
    "crush", "crystal", "cube", "culture", "cupboard", "curtain", "curve", "cushion",
    "custom", "cycle", "damage", "dance", "danger", "daring", "dash", "daughter", "dawn",
    "debate", "decade", "decide", "deer", "defend", "degree", "delay", "demand", "denial",
    "dentist", "depth", "desert", "design", "desk", "detail", "device", "diamond", "diary",
    "diesel", "dinner", "dinosaur", "direct", "dish", "dizzy", "doctor", "dolphin", "domain",
    "donkey", "door", "double", "dragon", "drama", "drastic", "draw", "dream", "dress",
    "drift", "drill", "drink", "drive", "drop", "drum", "duck", "dune", "during", "dust",
    "eagle", "early", "earth", "easily", "east", "echo", "ecology", "edge", "effort", "eight",
    "elbow", "elder", "embark", "embrace", "emerge", "empty", "enemy", "energy", "engine",
    "enjoy", "enough", "entire", "entry", "equal", "erode", "error", "escape", "essay",
    "estate", "evening", "evidence", "exact", "excess", "exile", "exist", "exotic", "expand",
    "expect", "expire", "explain", "fabric", "face", "faculty", "fade", "faint", "faith",
    "falcon", "fame", "family", "famous", "fancy", "fantasy", "farm", "fashion", "father",
    "fatigue", "fault", "feature", "fence", "festival", "fever", "fiber", "field", "figure",
    "film", "final", "finger", "finish", "fire", "fiscal", "fitness", "flag", "flame",
    "flash", "flavor", "flight", "flip", "float", "flock", "floor", "flower", "fluid",
    "flush", "foam", "focus", "forest", "forget", "fork", "fortune", "forum", "fossil",
    "frame", "frequent", "fresh", "friend", "fringe", "frog", "front", "frost", "frown",
    "frozen", "fruit", "funny", "furnace", "fury", "future", "gadget", "galaxy", "gallery",
    "game", "garage", "garden", "garlic", "garment", "gate", "gather", "gauge", "genius",
    "gentle", "ghost", "giant", "gift", "giggle", "ginger", "giraffe", "girl", "glad",
    "glance", "glare", "glass", "glide", "globe", "gloom", "glory", "glove", "glow", "glue",
    "goat", "goddess", "gold", "good", "goose", "gorilla", "gospel", "gossip", "govern",
    "gown", "grab", "grace", "grain", "grant", "grape", "grass", "gravity", "great", "green",
    "grid", "grief", "grit", "grocery", "group", "grow", "growl", "guard", "guess", "guide",
    "guilt", "guitar", "habit", "hair", "half", "hammer", "hamster", "hand", "happy",
    "harbor", "hard", "harvest", "hawk", "hazard", "head", "health", "heart", "heavy",
    "hedgehog", "height", "hello", "helmet", "hero", "hidden", "high", "hill", "hint", "hobby",
    "hockey", "hold", "hole", "holiday", "hollow", "home", "honey", "hood", "hope", "horn",
    "horror", "horse", "hospital", "host", "hotel", "hour", "hover", "humble", "humor",
    "hundred", "hungry", "hunt", "hurdle", "hurry", "hybrid", "icon", "idea", "identify",
    "idle", "ignore", "illegal", "illness", "image", "impact", "impose", "improve", "impulse",
    "inch", "include", "income", "index", "infant", "inform", "inhale", "inject", "injury",
    "inmate", "inner", "input", "inquiry", "insane", "insect", "inside", "inspire", "install",
    "intact", "invest", "invite", "iron", "island", "isolate", "issue", "item", "ivory",
    "jacket", "jaguar", "jazz", "jealous", "jeans", "jelly", "jewel", "join", "joke",
    "journey", "judge", "juice", "jump", "jungle", "junior", "just", "kangaroo", "keen",
    "keep", "ketchup", "kick", "kidney", "kind", "kingdom", "kiss", "kitchen", "kite",
    "kitten", "knee", "knife", "knock", "know", "label", "labor", "ladder", "lady", "lake",
    "lamp", "language", "laptop", "large", "later", "latin", "laugh", "laundry", "lava",
    "lawn", "lawsuit", "layer", "lazy", "leader", "leaf", "learn", "leave", "lecture",
    "left", "legal", "legend", "leisure", "lemon", "lend", "length", "lens", "leopard",
    "lesson", "letter", "level", "liberty", "library", "license", "life", "lift", "light",
    "like", "limb", "limit", "link", "lion", "liquid", "list", "little", "live", "lizard",
    "load", "loan", "lobster", "local", "lock", "logic", "lonely", "long", "loop", "lottery",
    "loud", "lounge", "love", "loyal", "lucky", "luggage", "lumber", "lunar", "lunch",
    "luxury", "lyrics", "machine", "magic", "magnet", "maid", "mail", "main", "major",
    "make", "mammal", "manage", "mandate", "mango", "mansion", "manual", "maple", "marble",
    "march", "margin", "marine", "market", "marriage", "mask", "mass", "master", "match",
    "matter", "maximum", "meadow", "mean", "measure", "meat", "medal", "media", "melody",
    "melt", "member", "memory", "mention", "menu", "mercy", "merge", "merit", "merry",
    "mesh", "message", "metal", "method", "middle", "midnight", "milk", "million", "mimic",
    "mind", "minimum", "minor", "minute", "miracle", "mirror", "misery", "miss", "mistake",
    "mixed", "mixture", "mobile", "model", "modify", "moment", "monitor", "monkey", "monster",
    "month", "moon", "moral", "more", "morning", "mosquito", "mother", "motion", "motor",
    "mountain", "mouse", "move", "movie", "much", "muffin", "mule", "multiply", "muscle",
    "museum", "mushroom", "music", "must", "mutual", "myself", "mystery", "myth", "naive",
    "name", "napkin", "narrow", "nasty", "nation", "nature", "near", "neck", "need",
    "negative", "neglect", "neither", "nephew", "nerve", "nest", "network", "neutral",
    "never", "news", "next", "nice", "night", "noble", "noise", "nominee", "noodle", "normal",
    "north", "nose", "notable", "note", "nothing", "notice", "novel", "number", "nurse",
    "oasis", "object", "oblige", "obscure", "observe", "obtain", "obvious", "occur", "ocean",
    "october", "odor", "offer", "office", "often", "olive", "olympic", "omit", "once",
    "onion", "online", "only", "open", "opera", "opinion", "oppose", "option", "orange",
    "orbit", "orchard", "order", "ordinary", "organ", "orient", "original", "orphan",
    "ostrich", "other", "outdoor", "outer", "output", "outside", "oval", "oven", "over",
    "owner", "oxygen", "oyster", "ozone", "pact", "paddle", "page", "pair", "palace", "palm",
    "panda", "panel", "panic", "panther", "paper", "parade", "parent", "park", "parrot",
    "party", "pass", "patch", "path", "patient", "patrol", "pattern", "pause", "pave",
    "payment", "peace", "peanut", "pear", "peasant", "pelican", "pencil", "people", "pepper",
    "perfect", "permit", "person", "pet", "phone", "photo", "phrase", "physical", "piano",
    "picnic", "picture", "piece", "pigeon", "pill", "pilot", "pink", "pioneer", "pipe",
    "pistol", "pitch", "pizza", "place", "planet", "plastic", "plate", "play", "please",
    "pledge", "pluck", "plug", "plunge", "poem", "poet", "point", "polar", "pole", "police",
    "pond", "pony", "pool", "popular", "portion", "position", "possible", "post", "potato",
    "pottery", "poverty", "powder", "power", "practice", "praise", "predict", "prefer",
    "prepare", "present", "pretty", "prevent", "price", "pride", "primary", "print",
    "priority", "prison", "private", "prize", "problem", "process", "produce", "profit",
    "program", "project", "promote", "proof", "property", "prosper", "protect", "proud",
    "provide", "public", "pudding", "pull", "pulp", "pulse", "pumpkin", "punch", "pupil",
    "puppy", "purchase", "purity", "purpose", "purse", "push", "puzzle", "pyramid", "quality",
    "quantum", "quarter", "question", "quick", "quit", "quiz", "quote", "rabbit", "raccoon",
    "race", "rack", "radar", "radio", "rail", "rain", "raise", "rally", "ramp", "ranch",
    "random", "range", "rapid", "rare", "rate", "rather", "raven", "razor", "ready", "real",
    "reason", "rebel", "rebuild", "recall", "receive", "recipe", "record", "recycle",
    "reduce", "reflect", "reform", "refuse", "region", "regret", "regular", "reject", "relax",
    "release", "relief", "rely", "remain", "remember", "remind", "remove", "render", "renew",
    "rent", "reopen", "repair", "repeat", "replace", "report", "require", "rescue",
    "resemble", "resist", "resource", "response", "result", "retire", "retreat", "return",
    "reunion", "reveal", "review", "reward", "rhythm", "ribbon", "rice", "rich", "ride",
    "ridge", "rifle", "right", "rigid", "ring", "riot", "ripple", "risk", "ritual", "rival",
    "river", "road", "roast", "robot", "robust", "rocket", "romance", "roof", "rookie",
    "room", "rose", "rotate", "rough", "round", "route", "royal", "rubber", "rude", "rug",
    "rule", "runway", "rural", "saddle", "sadness", "safe", "sail", "salad", "salmon",
    "salon", "salt", "salute", "same", "sample", "sand", "satisfy", "satoshi", "sauce",
    "sausage", "save", "scale", "scan", "scare", "scatter", "scene", "scheme", "school",
    "science", "scissors", "scorpion", "scout", "scrap", "screen", "script", "scrub", "search",
    "season", "seat", "second", "secret", "section", "security", "seed", "seek", "segment",
    "select", "sell", "seminar", "senior", "sense", "sentence", "series", "service",
    "session", "settle", "setup", "seven", "shadow", "shaft", "shallow", "share", "shed",
    "shell", "sheriff", "shield", "shift", "shine", "ship", "shiver", "shock", "shoe",
    "shoot", "shop", "short", "shoulder", "shove", "shrimp", "shrug", "shuffle", "sibling",
    "sick", "side", "siege", "sight", "sign", "silent", "silk", "silly", "silver", "similar",
    "simple", "since", "sing", "siren", "sister", "situate", "size", "skate", "sketch", "skill",
    "skin", "skirt", "skull", "slab", "slam", "sleep", "slender", "slice", "slide", "slight",
    "slim", "slogan", "slot", "slow", "slush", "small", "smart", "smile", "smoke", "smooth",
    "snack", "snake", "snap", "sniff", "snow", "soap", "soccer", "social", "sock", "soda",
    "soft", "solar", "soldier", "solid", "solution", "solve", "someone", "song", "soon",
    "sorry", "sort", "soul", "sound", "soup", "source", "south", "space", "spare", "spatial",
    "spawn", "speak", "special", "speed", "spell", "spend", "sphere", "spice", "spider",
    "spike", "spin", "spirit", "split", "spoil", "sponsor", "spoon", "sport", "spot", "spray",
    "spread", "spring", "spy", "square", "squeeze", "squirrel", "stable", "stadium", "staff",
    "stage", "stairs", "stamp", "stand", "start", "state", "stay", "steak", "steel", "stem",
    "step", "stereo", "stick", "still", "sting", "stock", "stomach", "stone", "stool",
    "story", "stove", "strategy", "street", "strike", "strong", "struggle", "student",
    "stuff", "stumble", "style", "subject", "submit", "subway", "success", "such", "sudden",
    "suffer", "sugar", "suggest", "suit", "summer", "sunny", "sunset", "super", "supply",
    "supreme", "sure", "surface", "surge", "surprise", "survey", "suspect", "sustain",
    "swallow", "swamp", "swap", "swarm", "swear", "sweet", "swift", "swim", "swing", "switch",
    "sword", "symbol", "symptom", "syrup", "system", "table", "tackle", "tail", "talent",
    "talk", "tank", "tape", "target", "task", "taste", "tattoo", "taxi", "teach", "team",
    "tell", "tenant", "tennis", "tent", "term", "test", "text", "thank", "that", "theme",
    "then", "theory", "there", "they", "thing", "this", "thought", "three", "thrive",
    "throw", "thumb", "thunder", "ticket", "tide", "tiger", "tilt", "timber", "time", "tiny",
    "tired", "tissue", "title", "toast", "tobacco", "today", "toddler", "together", "toilet",
    "token", "tomato", "tomorrow", "tone", "tongue", "tonight", "tool", "tooth", "topic",
    "topple", "torch", "tornado", "tortoise", "toss", "total", "tourist", "toward", "tower",
    "town", "toy", "track", "trade", "traffic", "tragic", "train", "transfer", "trap",
    "trash", "travel", "tray", "treat", "tree", "trend", "trial", "tribe", "trick", "trigger",
    "trim", "trip", "trophy", "trouble", "truck", "true", "truly", "trumpet", "trust",
    "truth", "tuition", "tumble", "tuna", "tunnel", "turkey", "turn", "turtle", "twelve",
    "twenty", "twice", "twin", "twist", "type", "typical", "ugly", "umbrella", "unable",
    "unaware", "uncle", "uncover", "under", "undo", "unfair", "unfold", "unhappy", "uniform",
    "unique", "unit", "universe", "unknown", "unlock", "until", "unusual", "unveil", "update",
    "upgrade", "uphold", "upon", "upper", "upset", "urban", "urge", "usage", "useful",
    "useless", "usual", "utility", "vacant", "vacuum", "vague", "valid", "valley", "valve",
    "vanish", "vapor", "various", "vast", "vault", "velvet", "vendor", "venture", "venue",
    "verb", "verify", "version", "very", "vessel", "veteran", "viable", "vibrant", "vicious",
    "victory", "video", "view", "village", "vintage", "violin", "virtual", "virus", "visa",
    "visit", "visual", "vital", "vivid", "vocal", "voice", "void", "volcano", "volume",
    "vote", "voyage", "wage", "wagon", "wait", "walk", "wall", "walnut", "want", "warfare",
    "warm", "warrior", "wash", "wasp", "waste", "water", "wave", "wealth", "weapon", "wear",
    "weasel", "weather", "wedding", "weekend", "weird", "welcome", "west", "whale", "wheat",
    "wheel", "whisper", "wide", "width", "wife", "wild", "will", "wind", "window", "wine",
    "wing", "wink", "winner", "winter", "wire", "wisdom", "wise", "wish", "witness", "wolf",
    "woman", "wonder", "wood", "wool", "word", "work", "world", "worry", "worth", "wrap",
    "wreck", "wrestle", "wrist", "write", "wrong", "yard", "year", "yellow", "young", "youth",
    "zebra", "zero", "zone",
];

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Write;

    #[test]
    fn test_filters_unplayable_entries() {
        let list = WordList::new([
            "cat", "house", "Apple", "toolong", "muchtoolong", "wo-rd", "caf\u{e9}s", "game",
        ])
        .unwrap();

        assert_eq!(list.len(), 3);
        assert!(list.contains("house"));
        assert!(list.contains("toolong"));
        assert!(list.contains("game"));
        assert!(!list.contains("cat"));
        assert!(!list.contains("Apple"));
    }

    #[test]
    fn test_padded_entries_are_not_playable() {
        let list = WordList::new(["  melon  ", "melon\t", "grape"]).unwrap();
        assert_eq!(list.len(), 1);
        assert!(list.contains("grape"));
        assert!(!list.contains("melon"));
    }

    #[test]
    fn test_empty_after_filter_is_error() {
        let result = WordList::new(["a", "ab", "ABCDE", "elevenchars"]);
        assert!(matches!(result, Err(WordListError::Empty)));
    }

    #[test]
    fn test_builtin_dictionary_is_all_playable() {
        let list = WordList::builtin().unwrap();
        assert!(list.len() > 500);
        for _ in 0..200 {
            assert!(is_playable(list.pick_word()));
        }
    }

    #[test]
    fn test_pick_word_covers_every_entry() {
        let list = WordList::new(["alpha", "bravo", "delta"]).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(list.pick_word_with(&mut rng).to_string());
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_scramble_is_permutation() {
        let mut rng = StdRng::seed_from_u64(42);
        for word in ["letter", "planet", "abcdefg", "zzzz"] {
            let scrambled = scramble_with(word, &mut rng);
            let mut a: Vec<char> = word.chars().collect();
            let mut b: Vec<char> = scrambled.chars().collect();
            a.sort_unstable();
            b.sort_unstable();
            assert_eq!(a, b, "{} is not a permutation of {}", scrambled, word);
        }
    }

    #[test]
    fn test_scramble_may_return_input_unchanged() {
        // Every permutation of a single repeated letter is the word itself
        assert_eq!(scramble("aaaa"), "aaaa");
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "orange\nKiwi\n  melon  \nfig\n").unwrap();

        let list = WordList::from_file(file.path()).unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.contains("orange"));
        assert!(list.contains("melon"));
    }

    #[test]
    fn test_from_missing_file() {
        let result = WordList::from_file("/definitely/not/here.txt");
        assert!(matches!(result, Err(WordListError::Io { .. })));
    }
}
