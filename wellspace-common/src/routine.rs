//! Routine plan types and response post-processing.

use serde::{Deserialize, Serialize};

/// A full plan spans 21 days; a degraded response may hold fewer.
pub const PLAN_LENGTH_DAYS: u32 = 21;

/// One day of the routine plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineDay {
    pub day: u32,
    pub tasks: Vec<String>,
    #[serde(default)]
    pub completed: bool,
}

/// Normalize a raw generation response into plan days.
///
/// Entries whose `day` is not an integer or whose `tasks` is not an array
/// are dropped; non-string task elements are skipped. Surviving days are
/// ordered ascending. The result is NOT padded or truncated to 21 entries.
pub fn normalize_plan(entries: &[serde_json::Value]) -> Vec<RoutineDay> {
    let mut days: Vec<RoutineDay> = entries
        .iter()
        .filter_map(|entry| {
            let day = entry.get("day")?.as_u64()?;
            let tasks = entry.get("tasks")?.as_array()?;
            let tasks = tasks
                .iter()
                .filter_map(|task| task.as_str().map(String::from))
                .collect();
            Some(RoutineDay {
                day: day as u32,
                tasks,
                completed: false,
            })
        })
        .collect();
    days.sort_by_key(|d| d.day);
    days
}

/// The fixed 3-day plan served when generation fails for any reason.
pub fn fallback_plan() -> Vec<RoutineDay> {
    let day = |day, tasks: [&str; 2]| RoutineDay {
        day,
        tasks: tasks.iter().map(|t| t.to_string()).collect(),
        completed: false,
    };
    vec![
        day(1, ["5-minute deep breathing exercise.", "Drink a glass of water."]),
        day(2, ["10-minute brisk walk outside.", "Stretch for 5 minutes."]),
        day(3, ["Error generating plan.", "Please try again."]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalize_drops_malformed_entries_and_sorts_by_day() {
        let entries = vec![
            json!({"day": 5, "tasks": ["Evening walk"]}),
            json!({"day": 2, "tasks": "not an array"}),
            json!({"day": 1, "tasks": ["Morning stretch", "Hydrate"]}),
        ];

        let plan = normalize_plan(&entries);

        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].day, 1);
        assert_eq!(plan[0].tasks, vec!["Morning stretch", "Hydrate"]);
        assert_eq!(plan[1].day, 5);
    }

    #[test]
    fn normalize_requires_integer_day() {
        let entries = vec![
            json!({"day": "three", "tasks": ["task"]}),
            json!({"tasks": ["task"]}),
            json!({"day": 3, "tasks": ["task"]}),
        ];

        let plan = normalize_plan(&entries);

        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].day, 3);
    }

    #[test]
    fn normalize_skips_non_string_tasks() {
        let entries = vec![json!({"day": 1, "tasks": ["walk", 42, null, "stretch"]})];

        let plan = normalize_plan(&entries);

        assert_eq!(plan[0].tasks, vec!["walk", "stretch"]);
    }

    #[test]
    fn normalized_days_start_uncompleted() {
        let entries = vec![json!({"day": 1, "tasks": ["walk"], "completed": true})];

        let plan = normalize_plan(&entries);

        assert!(!plan[0].completed);
    }

    #[test]
    fn fallback_plan_is_three_fixed_days() {
        let plan = fallback_plan();

        assert_eq!(plan.len(), 3);
        assert_eq!(
            plan.iter().map(|d| d.day).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(plan[2].tasks[0], "Error generating plan.");
    }
}
