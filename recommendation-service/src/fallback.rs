//! Deterministic keyword recommender used whenever the generative backend
//! cannot produce a usable answer.
//!
//! The query is lower-cased and checked against [`CATEGORY_TABLE`] in order.
//! The first category with any keyword occurring as a substring wins and its
//! top entries are returned with a fixed linear confidence decay. Queries
//! matching nothing get a generic set that echoes the query back.

use serde::{Deserialize, Serialize};

use crate::models::Recommendation;

/// Most recommendations a single response may carry
pub const MAX_RECOMMENDATIONS: usize = 5;

const TOP_CONFIDENCE: f64 = 0.90;
const CONFIDENCE_STEP: f64 = 0.03;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Scary,
    Romance,
    Fantasy,
    Inspiring,
    Classic,
    Adventure,
    Sad,
    Funny,
    Scientific,
}

/// A book suggested for a category, with the text explaining why
#[derive(Debug, Clone, Copy)]
pub struct Candidate {
    pub book_id: &'static str,
    pub reason: &'static str,
}

/// Trigger keywords and ranked candidates for one category
#[derive(Debug, Clone, Copy)]
pub struct CategoryRule {
    pub category: Category,
    pub keywords: &'static [&'static str],
    pub candidates: &'static [Candidate],
}

impl CategoryRule {
    fn matches(&self, normalized_query: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| normalized_query.contains(keyword))
    }
}

/// Recommend from the built-in category table.
pub fn fallback_recommendations(query: &str) -> Vec<Recommendation> {
    recommend_with_table(CATEGORY_TABLE, query)
}

/// First rule in `table` whose keywords occur in `query`.
pub fn classify<'a>(table: &'a [CategoryRule], query: &str) -> Option<&'a CategoryRule> {
    let normalized = query.to_lowercase();
    table.iter().find(|rule| rule.matches(&normalized))
}

/// Recommend from an arbitrary table. Never returns an empty list.
pub fn recommend_with_table(table: &[CategoryRule], query: &str) -> Vec<Recommendation> {
    let recommendations: Vec<Recommendation> = match classify(table, query) {
        Some(rule) if !rule.candidates.is_empty() => rule
            .candidates
            .iter()
            .take(MAX_RECOMMENDATIONS)
            .enumerate()
            .map(|(index, candidate)| {
                Recommendation::new(
                    (index + 1).to_string(),
                    candidate.book_id,
                    candidate.reason,
                    decayed_confidence(index),
                )
            })
            .collect(),
        _ => generic_recommendations(query),
    };

    recommendations
        .into_iter()
        .take(MAX_RECOMMENDATIONS)
        .collect()
}

/// 0.90, 0.87, 0.84, ... rounded to two decimals.
fn decayed_confidence(index: usize) -> f64 {
    round2(TOP_CONFIDENCE - index as f64 * CONFIDENCE_STEP)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn generic_recommendations(query: &str) -> Vec<Recommendation> {
    vec![
        Recommendation::new(
            "1",
            "1",
            format!(
                "Based on your query \"{query}\", I recommend The Midnight Library for its thought-provoking exploration of life's possibilities and meaningful storytelling that appeals to many readers."
            ),
            0.80,
        ),
        Recommendation::new(
            "2",
            "6",
            format!(
                "For \"{query}\": The Seven Husbands of Evelyn Hugo offers engaging storytelling with rich character development that many readers find captivating, making it a great match for your interests."
            ),
            0.75,
        ),
        Recommendation::new(
            "3",
            "10",
            format!(
                "For \"{query}\": The Song of Achilles provides beautiful, emotional storytelling that resonates with readers looking for compelling narratives and well-developed characters."
            ),
            0.70,
        ),
        Recommendation::new(
            "4",
            "11",
            format!(
                "For \"{query}\": Where the Crawdads Sing combines mystery with beautiful nature writing, offering an engaging story that appeals to diverse reading preferences."
            ),
            0.68,
        ),
    ]
}

/// Categories in priority order. An ambiguous query resolves to whichever
/// matching category appears first.
pub static CATEGORY_TABLE: &[CategoryRule] = &[
    CategoryRule {
        category: Category::Scary,
        keywords: &["scary", "horror", "dark", "thriller", "suspense", "creepy", "frightening"],
        candidates: &[
            Candidate {
                book_id: "18",
                reason: "Gone Girl is a psychological thriller with dark, twisted themes that will keep you on edge with its disturbing portrayal of a marriage gone wrong.",
            },
            Candidate {
                book_id: "23",
                reason: "The Girl with the Dragon Tattoo offers a dark, gritty thriller with disturbing elements and complex mystery that matches your interest in scary content.",
            },
            Candidate {
                book_id: "15",
                reason: "The Handmaid's Tale presents a chilling dystopian world that explores dark themes of control and oppression, creating a truly unsettling reading experience.",
            },
            Candidate {
                book_id: "3",
                reason: "The Silent Patient is a psychological thriller with dark twists and disturbing revelations that will keep you guessing until the shocking end.",
            },
            Candidate {
                book_id: "34",
                reason: "Mexican Gothic is a Victorian Gothic horror set in 1950s Mexico, featuring supernatural elements and genuinely creepy atmosphere.",
            },
            Candidate {
                book_id: "37",
                reason: "Verity is a psychological thriller about a writer and dark secrets that will leave you questioning what's real and what's manipulation.",
            },
            Candidate {
                book_id: "35",
                reason: "The Sanatorium is a chilling thriller set in a remote Swiss hotel where murders unfold in an isolated, claustrophobic setting.",
            },
        ],
    },
    CategoryRule {
        category: Category::Romance,
        keywords: &["romance", "love", "romantic", "relationship", "dating"],
        candidates: &[
            Candidate {
                book_id: "4",
                reason: "People We Meet on Vacation is a perfect romance about two best friends discovering love, with heartwarming relationship dynamics and emotional depth.",
            },
            Candidate {
                book_id: "28",
                reason: "Pride and Prejudice is the quintessential romance novel, featuring the iconic love story between Elizabeth Bennet and Mr. Darcy with wit and charm.",
            },
            Candidate {
                book_id: "16",
                reason: "Normal People explores a complex, intimate relationship between two people over many years, offering deep emotional connection and realistic romance.",
            },
            Candidate {
                book_id: "6",
                reason: "The Seven Husbands of Evelyn Hugo tells the captivating love story of a Hollywood icon, filled with passion, secrets, and romantic drama.",
            },
            Candidate {
                book_id: "36",
                reason: "It Ends with Us is a powerful romance about love, resilience, and difficult choices that will make you believe in the strength of the human heart.",
            },
            Candidate {
                book_id: "40",
                reason: "Beach Read features two rival writers who challenge each other to write outside their genres, leading to unexpected romance and personal growth.",
            },
            Candidate {
                book_id: "20",
                reason: "The Fault in Our Stars is a beautiful, heartbreaking love story between two teenagers that will make you believe in the power of first love.",
            },
        ],
    },
    CategoryRule {
        category: Category::Fantasy,
        keywords: &["fantasy", "magic", "magical", "wizard", "mythical", "supernatural"],
        candidates: &[
            Candidate {
                book_id: "25",
                reason: "Harry Potter and the Sorcerer's Stone is the perfect introduction to magical worlds, featuring wizards, spells, and enchanting adventures at Hogwarts.",
            },
            Candidate {
                book_id: "22",
                reason: "The Hobbit offers a classic fantasy adventure with magical creatures, wizards, and epic quests through Middle-earth's enchanted landscapes.",
            },
            Candidate {
                book_id: "13",
                reason: "Circe reimagines Greek mythology with beautiful, magical storytelling about the goddess Circe and her supernatural powers and transformations.",
            },
            Candidate {
                book_id: "12",
                reason: "The Invisible Life of Addie LaRue features a woman cursed with immortality and magic, blending fantasy elements with beautiful storytelling.",
            },
            Candidate {
                book_id: "43",
                reason: "The Priory of the Orange Tree is an epic fantasy featuring dragons, ancient magic, and a richly detailed world full of mythical creatures.",
            },
            Candidate {
                book_id: "49",
                reason: "The House in the Cerulean Sea is a heartwarming fantasy about found family, magical creatures, and acceptance in a whimsical setting.",
            },
            Candidate {
                book_id: "70",
                reason: "Six of Crows features a crew of criminals with magical abilities attempting an impossible heist in a richly imagined fantasy world.",
            },
        ],
    },
    CategoryRule {
        category: Category::Inspiring,
        keywords: &["inspiring", "motivational", "uplifting", "positive", "hope", "success"],
        candidates: &[
            Candidate {
                book_id: "5",
                reason: "Atomic Habits provides practical, inspiring guidance on building positive life changes through small, consistent actions that lead to remarkable results.",
            },
            Candidate {
                book_id: "21",
                reason: "Becoming by Michelle Obama is deeply inspiring, sharing her journey from childhood to First Lady with wisdom, hope, and empowering life lessons.",
            },
            Candidate {
                book_id: "14",
                reason: "The Alchemist is an uplifting tale about following your dreams and finding your purpose, filled with inspiring wisdom about life's journey.",
            },
        ],
    },
    CategoryRule {
        category: Category::Classic,
        keywords: &["classic", "literature", "timeless", "famous", "important"],
        candidates: &[
            Candidate {
                book_id: "26",
                reason: "To Kill a Mockingbird is a timeless classic that addresses important themes of justice and morality through beautiful, enduring storytelling.",
            },
            Candidate {
                book_id: "19",
                reason: "The Great Gatsby is one of literature's most celebrated classics, offering profound insights into the American Dream with elegant prose.",
            },
            Candidate {
                book_id: "24",
                reason: "The Catcher in the Rye is a influential classic that captures the voice of youth and alienation with honest, memorable storytelling.",
            },
        ],
    },
    CategoryRule {
        category: Category::Adventure,
        keywords: &["adventure", "action", "journey", "travel", "exploration"],
        candidates: &[
            Candidate {
                book_id: "30",
                reason: "Life of Pi is an extraordinary adventure story about survival on the ocean with a Bengal tiger, combining thrilling action with philosophical depth.",
            },
            Candidate {
                book_id: "22",
                reason: "The Hobbit is the ultimate adventure tale, following Bilbo Baggins on an epic journey through dangerous lands filled with excitement and discovery.",
            },
            Candidate {
                book_id: "7",
                reason: "Dune offers epic space adventure on a desert planet with political intrigue, action, and exploration of a vast, complex universe.",
            },
        ],
    },
    CategoryRule {
        category: Category::Sad,
        keywords: &["sad", "emotional", "tragic", "heartbreaking", "cry", "tears"],
        candidates: &[
            Candidate {
                book_id: "20",
                reason: "The Fault in Our Stars is a deeply emotional story about young love in the face of tragedy, guaranteed to move you to tears with its heartbreaking beauty.",
            },
            Candidate {
                book_id: "27",
                reason: "The Book Thief tells a tragic yet beautiful story set during WWII, narrated by Death, offering profound emotional impact about humanity and loss.",
            },
            Candidate {
                book_id: "17",
                reason: "The Kite Runner is an emotionally powerful story of friendship, guilt, and redemption set against the backdrop of Afghanistan's tragic history.",
            },
        ],
    },
    CategoryRule {
        category: Category::Funny,
        keywords: &["funny", "humor", "comedy", "laugh", "amusing", "witty"],
        candidates: &[
            Candidate {
                book_id: "8",
                reason: "The Thursday Murder Club combines mystery with delightful humor, featuring charming elderly characters solving crimes with wit and amusing banter.",
            },
            Candidate {
                book_id: "22",
                reason: "The Hobbit has wonderful moments of humor and whimsy throughout Bilbo's adventure, with Tolkien's charming and often amusing storytelling style.",
            },
            Candidate {
                book_id: "28",
                reason: "Pride and Prejudice is filled with Jane Austen's sharp wit and social satire, offering clever dialogue and amusing observations about society.",
            },
        ],
    },
    CategoryRule {
        category: Category::Scientific,
        keywords: &["science", "space", "sci-fi", "future", "technology", "scientific"],
        candidates: &[
            Candidate {
                book_id: "2",
                reason: "Project Hail Mary is a brilliant science fiction story combining hard science with thrilling space adventure and problem-solving.",
            },
            Candidate {
                book_id: "7",
                reason: "Dune is a masterpiece of science fiction, featuring advanced technology, space travel, and complex scientific concepts in an epic setting.",
            },
            Candidate {
                book_id: "15",
                reason: "The Handmaid's Tale presents a chilling vision of the future, exploring how technology and science can be used for social control.",
            },
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn confidences(recs: &[Recommendation]) -> Vec<f64> {
        recs.iter().map(|r| r.confidence).collect()
    }

    fn book_ids(recs: &[Recommendation]) -> Vec<&str> {
        recs.iter().map(|r| r.book_id.as_str()).collect()
    }

    #[test]
    fn test_single_category_match() {
        let recs = fallback_recommendations("Something SCARY please");

        assert_eq!(recs.len(), 5);
        assert_eq!(confidences(&recs), vec![0.90, 0.87, 0.84, 0.81, 0.78]);
        assert_eq!(book_ids(&recs), vec!["18", "23", "15", "3", "34"]);
        let ids: Vec<&str> = recs.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn test_every_category_returns_its_declared_prefix() {
        for rule in CATEGORY_TABLE {
            let recs = recommend_with_table(std::slice::from_ref(rule), rule.keywords[0]);
            let expected: Vec<&str> = rule
                .candidates
                .iter()
                .take(MAX_RECOMMENDATIONS)
                .map(|c| c.book_id)
                .collect();
            assert_eq!(book_ids(&recs), expected, "category {:?}", rule.category);
            assert!(recs.windows(2).all(|w| w[0].confidence > w[1].confidence));
        }
    }

    #[test]
    fn test_table_order_breaks_ties() {
        let recs = fallback_recommendations("scary romance");
        assert_eq!(recs[0].book_id, "18");

        let rule = classify(CATEGORY_TABLE, "a funny space adventure").unwrap();
        assert_eq!(rule.category, Category::Adventure);
    }

    #[test]
    fn test_keyword_matches_inside_words() {
        // "lovely" contains "love"
        let rule = classify(CATEGORY_TABLE, "a lovely read").unwrap();
        assert_eq!(rule.category, Category::Romance);
    }

    #[test]
    fn test_no_match_uses_generic_set() {
        let recs = fallback_recommendations("xyz123");

        assert_eq!(recs.len(), 4);
        assert_eq!(confidences(&recs), vec![0.80, 0.75, 0.70, 0.68]);
        assert_eq!(book_ids(&recs), vec!["1", "6", "10", "11"]);
        assert!(recs.iter().all(|r| r.reason.contains("xyz123")));
        assert!(recs[0].reason.starts_with(
            "Based on your query \"xyz123\", I recommend The Midnight Library for its thought-provoking"
        ));
        assert!(recs[3].reason.ends_with(
            "Where the Crawdads Sing combines mystery with beautiful nature writing, offering an engaging story that appeals to diverse reading preferences."
        ));
    }

    #[test]
    fn test_empty_query_is_total() {
        let recs = fallback_recommendations("");
        assert_eq!(recs.len(), 4);
    }

    #[test]
    fn test_short_category() {
        static SHORT: &[CategoryRule] = &[CategoryRule {
            category: Category::Funny,
            keywords: &["funny"],
            candidates: &[
                Candidate {
                    book_id: "8",
                    reason: "witty",
                },
                Candidate {
                    book_id: "22",
                    reason: "whimsical",
                },
            ],
        }];

        let recs = recommend_with_table(SHORT, "something funny");
        assert_eq!(book_ids(&recs), vec!["8", "22"]);
        assert_eq!(confidences(&recs), vec![0.90, 0.87]);
    }

    #[test]
    fn test_deterministic() {
        let first = serde_json::to_string(&fallback_recommendations("magic and wizards")).unwrap();
        let second = serde_json::to_string(&fallback_recommendations("magic and wizards")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_table_shape() {
        let catalog = Catalog::builtin();
        assert_eq!(CATEGORY_TABLE.len(), 9);
        for rule in CATEGORY_TABLE {
            assert!(!rule.keywords.is_empty());
            assert!(rule.candidates.len() <= 7);
            for candidate in rule.candidates {
                assert!(catalog.contains(candidate.book_id), "{}", candidate.book_id);
                assert!(!candidate.reason.is_empty());
            }
        }
    }
}
