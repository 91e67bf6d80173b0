//! Static subject catalog
//!
//! The subject browser data: three subjects with per-grade topic lists.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Topic {
    pub title: &'static str,
    pub content: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct GradeTopics {
    pub grade: u8,
    pub topics: &'static [Topic],
}

#[derive(Debug, Clone, Serialize)]
pub struct Subject {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub grades: &'static [GradeTopics],
}

pub const SUBJECTS: &[Subject] = &[
    Subject {
        id: "math",
        name: "Mathematics",
        description: "Numbers, shapes, patterns, and logical thinking",
        icon: "📐",
        grades: &[
            GradeTopics {
                grade: 1,
                topics: &[
                    Topic {
                        title: "Counting Numbers",
                        content: "Learn to count from 1 to 100 with interactive examples.",
                    },
                    Topic {
                        title: "Basic Addition",
                        content: "Start adding single-digit numbers together.",
                    },
                    Topic {
                        title: "Shapes Recognition",
                        content: "Identify circles, squares, triangles, and rectangles.",
                    },
                ],
            },
            GradeTopics {
                grade: 5,
                topics: &[
                    Topic {
                        title: "Fractions",
                        content: "Learn about fractions, how to compare them, and basic operations.",
                    },
                    Topic {
                        title: "Decimals",
                        content: "Introduction to decimals and their relationship to fractions.",
                    },
                    Topic {
                        title: "Geometry Basics",
                        content: "Area and perimeter of simple shapes.",
                    },
                ],
            },
            GradeTopics {
                grade: 10,
                topics: &[
                    Topic {
                        title: "Algebra II",
                        content: "Advanced algebraic expressions and equations.",
                    },
                    Topic {
                        title: "Trigonometry",
                        content: "Functions, identities and applications.",
                    },
                    Topic {
                        title: "Statistics",
                        content: "Data analysis, probability, and distributions.",
                    },
                ],
            },
        ],
    },
    Subject {
        id: "science",
        name: "Science",
        description: "Discovering how our world works through observation and experimentation",
        icon: "🔬",
        grades: &[
            GradeTopics {
                grade: 1,
                topics: &[
                    Topic {
                        title: "Living Things",
                        content: "Introduction to plants, animals, and humans.",
                    },
                    Topic {
                        title: "Weather",
                        content: "Basic understanding of weather patterns.",
                    },
                    Topic {
                        title: "The Five Senses",
                        content: "Explore how we perceive the world through our senses.",
                    },
                ],
            },
            GradeTopics {
                grade: 5,
                topics: &[
                    Topic {
                        title: "Ecosystems",
                        content: "How living things interact with their environment.",
                    },
                    Topic {
                        title: "Matter & Energy",
                        content: "Properties of matter and different forms of energy.",
                    },
                    Topic {
                        title: "Human Body",
                        content: "Major body systems and their functions.",
                    },
                ],
            },
            GradeTopics {
                grade: 10,
                topics: &[
                    Topic {
                        title: "Physics",
                        content: "Forces, motion, energy, and waves.",
                    },
                    Topic {
                        title: "Chemistry",
                        content: "Atomic structure, periodic table, and chemical reactions.",
                    },
                    Topic {
                        title: "Biology",
                        content: "Cells, genetics, evolution, and human physiology.",
                    },
                ],
            },
        ],
    },
    Subject {
        id: "english",
        name: "English",
        description: "Reading, writing, speaking, and understanding language",
        icon: "📚",
        grades: &[
            GradeTopics {
                grade: 1,
                topics: &[
                    Topic {
                        title: "Phonics",
                        content: "Learning letter sounds and basic word formation.",
                    },
                    Topic {
                        title: "Sight Words",
                        content: "Common words to recognize instantly.",
                    },
                    Topic {
                        title: "Simple Sentences",
                        content: "Creating basic sentences with subjects and verbs.",
                    },
                ],
            },
            GradeTopics {
                grade: 5,
                topics: &[
                    Topic {
                        title: "Reading Comprehension",
                        content: "Understanding meaning and drawing conclusions from text.",
                    },
                    Topic {
                        title: "Grammar",
                        content: "Parts of speech, sentence structure, and punctuation.",
                    },
                    Topic {
                        title: "Creative Writing",
                        content: "Expressing ideas through stories and descriptions.",
                    },
                ],
            },
            GradeTopics {
                grade: 10,
                topics: &[
                    Topic {
                        title: "Literature Analysis",
                        content: "Critical reading of classic and contemporary texts.",
                    },
                    Topic {
                        title: "Essay Writing",
                        content: "Forming arguments and supporting with evidence.",
                    },
                    Topic {
                        title: "Research Skills",
                        content: "Finding and evaluating sources, citing properly.",
                    },
                ],
            },
        ],
    },
];

/// Look up a subject by id.
pub fn subject(id: &str) -> Option<&'static Subject> {
    SUBJECTS.iter().find(|s| s.id == id)
}

/// Topics for a subject at a given grade.
pub fn topics_for(id: &str, grade: u8) -> Option<&'static [Topic]> {
    subject(id)?
        .grades
        .iter()
        .find(|g| g.grade == grade)
        .map(|g| g.topics)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_three_subjects() {
        assert_eq!(SUBJECTS.len(), 3);
        assert!(subject("math").is_some());
        assert!(subject("history").is_none());
    }

    #[test]
    fn grade_lookup_finds_topics() {
        let topics = topics_for("math", 5).unwrap();
        assert!(topics.iter().any(|t| t.title == "Fractions"));
        assert!(topics_for("math", 7).is_none());
    }
}
