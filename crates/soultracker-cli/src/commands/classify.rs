use clap::{Args, ValueEnum};
use serde::Serialize;
use soultracker_core::{Config, Emotion, EmotionClassifier, KeywordTable, MoodBooster, TablePreset};

use super::{print_json, CmdResult};

#[derive(Clone, Copy, ValueEnum)]
enum Preset {
    Standard,
    Extended,
}

impl From<Preset> for TablePreset {
    fn from(p: Preset) -> Self {
        match p {
            Preset::Standard => TablePreset::Standard,
            Preset::Extended => TablePreset::Extended,
        }
    }
}

#[derive(Args)]
pub struct ClassifyArgs {
    /// Text to classify
    #[arg(required = true, num_args = 1..)]
    text: Vec<String>,
    /// Keyword table to use instead of the configured one
    #[arg(long, value_enum)]
    preset: Option<Preset>,
}

#[derive(Serialize)]
struct Classification {
    emotion: Emotion,
    emoji: &'static str,
    booster: Option<MoodBooster>,
}

pub fn run(args: ClassifyArgs) -> CmdResult {
    let table = match args.preset {
        Some(preset) => KeywordTable::from_preset(preset.into()),
        None => Config::read()?.classifier.keyword_table(),
    };
    let text = args.text.join(" ");
    let emotion = EmotionClassifier::with_table(table).classify(&text);
    print_json(&Classification {
        emotion,
        emoji: emotion.emoji(),
        booster: MoodBooster::suggest(emotion, text.len()),
    })
}
