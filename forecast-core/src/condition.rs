//! Free-text condition classification and the assets each class selects.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionCategory {
    Clear,
    Cloudy,
    Rainy,
    Snowy,
    Foggy,
    Stormy,
    Windy,
    Unknown,
}

/// Keyword groups in priority order. A text containing both "rain" and
/// "storm" is Rainy because the rain group comes first.
const RULES: &[(&[&str], ConditionCategory)] = &[
    (&["cloud"], ConditionCategory::Cloudy),
    (&["rain", "shower"], ConditionCategory::Rainy),
    (&["snow"], ConditionCategory::Snowy),
    (&["fog"], ConditionCategory::Foggy),
    (&["thunder", "storm"], ConditionCategory::Stormy),
    (&["wind"], ConditionCategory::Windy),
    (&["clear"], ConditionCategory::Clear),
];

/// Case-insensitive substring match against `RULES`, first match wins.
pub fn classify(condition_text: &str) -> ConditionCategory {
    let text = condition_text.to_lowercase();

    RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| text.contains(k)))
        .map(|(_, category)| *category)
        .unwrap_or(ConditionCategory::Unknown)
}

/// Small icon shown next to a temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconAsset {
    Sun,
    Cloud,
    Fog,
    Rain,
    Snow,
    Storm,
    Wind,
}

impl IconAsset {
    pub fn file_name(&self) -> &'static str {
        match self {
            IconAsset::Sun => "sun.png",
            IconAsset::Cloud => "cloud.png",
            IconAsset::Fog => "fog.png",
            IconAsset::Rain => "rain.png",
            IconAsset::Snow => "snow.png",
            IconAsset::Storm => "storm.png",
            IconAsset::Wind => "windy.png",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            IconAsset::Sun => "sun",
            IconAsset::Cloud => "cloud",
            IconAsset::Fog => "fog",
            IconAsset::Rain => "rain",
            IconAsset::Snow => "snow",
            IconAsset::Storm => "storm",
            IconAsset::Wind => "wind",
        }
    }
}

/// Full-screen background image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BackgroundAsset {
    #[default]
    Clear,
    Cloudy,
    Rainy,
    Snow,
    Fog,
    Stormy,
}

impl BackgroundAsset {
    pub fn file_name(&self) -> &'static str {
        match self {
            BackgroundAsset::Clear => "Clear.jpg",
            BackgroundAsset::Cloudy => "Cloudy.jpg",
            BackgroundAsset::Rainy => "Rainy.jpg",
            BackgroundAsset::Snow => "snow.jpg",
            BackgroundAsset::Fog => "fog.png",
            BackgroundAsset::Stormy => "Stormy.jpg",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BackgroundAsset::Clear => "Clear",
            BackgroundAsset::Cloudy => "Cloudy",
            BackgroundAsset::Rainy => "Rainy",
            BackgroundAsset::Snow => "Snow",
            BackgroundAsset::Fog => "Fog",
            BackgroundAsset::Stormy => "Stormy",
        }
    }
}

impl ConditionCategory {
    /// `None` for Unknown; callers keep whatever icon they had.
    pub fn icon(&self) -> Option<IconAsset> {
        match self {
            ConditionCategory::Clear => Some(IconAsset::Sun),
            ConditionCategory::Cloudy => Some(IconAsset::Cloud),
            ConditionCategory::Rainy => Some(IconAsset::Rain),
            ConditionCategory::Snowy => Some(IconAsset::Snow),
            ConditionCategory::Foggy => Some(IconAsset::Fog),
            ConditionCategory::Stormy => Some(IconAsset::Storm),
            ConditionCategory::Windy => Some(IconAsset::Wind),
            ConditionCategory::Unknown => None,
        }
    }

    /// `None` for Windy and Unknown; the previous background stays up.
    pub fn background(&self) -> Option<BackgroundAsset> {
        match self {
            ConditionCategory::Clear => Some(BackgroundAsset::Clear),
            ConditionCategory::Cloudy => Some(BackgroundAsset::Cloudy),
            ConditionCategory::Rainy => Some(BackgroundAsset::Rainy),
            ConditionCategory::Snowy => Some(BackgroundAsset::Snow),
            ConditionCategory::Foggy => Some(BackgroundAsset::Fog),
            ConditionCategory::Stormy => Some(BackgroundAsset::Stormy),
            ConditionCategory::Windy | ConditionCategory::Unknown => None,
        }
    }
}
