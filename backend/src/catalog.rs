//! Static workout and sleep-sound catalogs.
//!
//! These are fixed content, not user data; only the completion/play
//! state around them is persisted.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkoutCategory {
    #[serde(rename = "Home Workouts")]
    HomeWorkouts,
    Yoga,
    Stretching,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkoutLevel {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Workout {
    pub id: u32,
    pub category: WorkoutCategory,
    pub title: &'static str,
    pub duration_minutes: u32,
    pub level: WorkoutLevel,
    pub youtube_id: &'static str,
}

pub const WORKOUTS: [Workout; 6] = [
    Workout {
        id: 1,
        category: WorkoutCategory::HomeWorkouts,
        title: "5-Min Full Body Warmup",
        duration_minutes: 5,
        level: WorkoutLevel::Beginner,
        youtube_id: "sWBVb_0G5K0",
    },
    Workout {
        id: 2,
        category: WorkoutCategory::Yoga,
        title: "Morning Yoga Flow",
        duration_minutes: 15,
        level: WorkoutLevel::Beginner,
        youtube_id: "4C-gxOE0j7s",
    },
    Workout {
        id: 3,
        category: WorkoutCategory::Stretching,
        title: "Desk Posture Fix Exercises",
        duration_minutes: 10,
        level: WorkoutLevel::Beginner,
        youtube_id: "BdfTuxdfvVc",
    },
    Workout {
        id: 4,
        category: WorkoutCategory::HomeWorkouts,
        title: "15-Min Cardio Blast",
        duration_minutes: 15,
        level: WorkoutLevel::Intermediate,
        youtube_id: "ml6cT4AZdqI",
    },
    Workout {
        id: 5,
        category: WorkoutCategory::Yoga,
        title: "Power Yoga for Strength",
        duration_minutes: 30,
        level: WorkoutLevel::Intermediate,
        youtube_id: "kFdN8_M23pE",
    },
    Workout {
        id: 6,
        category: WorkoutCategory::Stretching,
        title: "Full Body Cool Down",
        duration_minutes: 10,
        level: WorkoutLevel::Beginner,
        youtube_id: "sRtcS_a_B30",
    },
];

#[derive(Debug, Clone, Copy, Serialize)]
pub struct SleepSound {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub file: &'static str,
}

pub const SLEEP_SOUNDS: [SleepSound; 3] = [
    SleepSound {
        id: 1,
        title: "Deep Sleep",
        description: "Delta Waves Binaural Beats",
        file: "https://archive.org/download/BinauralBeatsForStudying/Binaural%20Beats%20-%20Delta%20Waves%20%28For%20Deep%20Sleep%29.mp3",
    },
    SleepSound {
        id: 2,
        title: "Calming Mind",
        description: "Theta Waves Binaural Beats",
        file: "https://archive.org/download/BinauralBeatsForStudying/Binaural%20Beats%20-%20Theta%20Waves%20%28For%20Relaxation%20And%20Meditation%29.mp3",
    },
    SleepSound {
        id: 3,
        title: "Relaxing Night Rain",
        description: "Natural rain sounds",
        file: "https://archive.org/download/RainyMood/RainyMood.mp3",
    },
];

pub fn workout(id: u32) -> Option<&'static Workout> {
    WORKOUTS.iter().find(|w| w.id == id)
}

pub fn sleep_sound(id: u32) -> Option<&'static SleepSound> {
    SLEEP_SOUNDS.iter().find(|s| s.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_ids_are_unique() {
        for w in &WORKOUTS {
            assert_eq!(WORKOUTS.iter().filter(|o| o.id == w.id).count(), 1);
        }
        for s in &SLEEP_SOUNDS {
            assert_eq!(SLEEP_SOUNDS.iter().filter(|o| o.id == s.id).count(), 1);
        }
    }

    #[test]
    fn category_serializes_with_spaces() {
        let json = serde_json::to_string(&WorkoutCategory::HomeWorkouts).unwrap();
        assert_eq!(json, "\"Home Workouts\"");
    }
}
