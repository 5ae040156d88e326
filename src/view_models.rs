//! Plain projections the rendering layer consumes. No DOM or widget code
//! lives in this crate; these structs are its entire outward surface.

/// One tab/option entry for the rules screen.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionInfo {
    pub id: String,
    pub title: String,
    pub tagline: String,
    /// Built-in rules plus custom rules filed under this section.
    pub total_rules: usize,
    pub is_custom: bool,
    pub active: bool,
}

impl SectionInfo {
    pub fn label(&self) -> String {
        format!("{} · {}", self.title, self.total_rules)
    }
}

/// Badge card with its unlock state resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct AchievementCard {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub unlocked: bool,
}

/// One student line in the teacher/admin panels.
#[derive(Clone, Debug, PartialEq)]
pub struct StudentRow {
    pub id: String,
    pub name: String,
    pub group: String,
    pub tests_taken: usize,
    pub average_percent: u32,
}

/// Students of one group, for the teacher results panel.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupSummary {
    pub group: String,
    pub students: Vec<StudentRow>,
}

/// One teacher line in the admin panel. The password is the stored plaintext
/// value; the panel shows it verbatim.
#[derive(Clone, Debug, PartialEq)]
pub struct TeacherRow {
    pub id: String,
    pub username: String,
    pub password: String,
    pub created_at: u64,
}
