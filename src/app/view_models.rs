use std::collections::BTreeMap;

use super::*;

impl App {
    /// Section tabs in render order: built-ins first, then user sections.
    pub fn section_infos(&self) -> Vec<SectionInfo> {
        self.all_sections()
            .into_iter()
            .map(|section| SectionInfo {
                id: section.id.clone(),
                title: section.title.clone(),
                tagline: section.tagline.clone(),
                total_rules: self.count_rules_in_section(&section.id),
                is_custom: section.is_custom,
                active: section.id == self.rule_category,
            })
            .collect()
    }

    /// Full badge catalog with the unlock state resolved per card.
    pub fn achievement_cards(&self) -> Vec<AchievementCard> {
        self.achievement_catalog
            .iter()
            .map(|a| AchievementCard {
                id: a.id.clone(),
                title: a.title.clone(),
                description: a.description.clone(),
                icon: a.icon.clone(),
                unlocked: self.is_unlocked(&a.id),
            })
            .collect()
    }

    /// Teacher panel: students grouped by group, groups sorted by name.
    pub fn group_summaries(&self) -> Vec<GroupSummary> {
        let mut groups: BTreeMap<String, Vec<StudentRow>> = BTreeMap::new();
        for student in self.students() {
            groups
                .entry(student.group.clone())
                .or_default()
                .push(StudentRow {
                    id: student.id.clone(),
                    name: student.full_name(),
                    group: student.group.clone(),
                    tests_taken: student.results.len(),
                    average_percent: student.average_percent(),
                });
        }
        groups
            .into_iter()
            .map(|(group, students)| GroupSummary { group, students })
            .collect()
    }

    /// Admin panel rows. Passwords are the stored plaintext values and
    /// surface verbatim, exactly as the persisted model keeps them.
    pub fn teacher_rows(&self) -> Vec<TeacherRow> {
        self.teachers()
            .map(|t| TeacherRow {
                id: t.id.clone(),
                username: t.username.clone(),
                password: t.password.clone(),
                created_at: t.created_at,
            })
            .collect()
    }
}
