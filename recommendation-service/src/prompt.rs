use crate::catalog::Catalog;

const LIBRARIAN_INSTRUCTIONS: &str = r#"
Work out the themes, genres, moods and concrete elements the reader is asking for.
Match on content and tone, not only on genre labels, and treat implicit wishes
("something dark" means thriller or mystery) the same as explicit ones.

Keyword hints:
- "scary": horror, thriller, dark themes (Gone Girl, The Girl with the Dragon Tattoo)
- "romance": love stories, relationships (Pride and Prejudice, Normal People)
- "fantasy": magic, mythical worlds (Harry Potter, The Hobbit, Circe)
- "inspiring": uplifting, motivational (Becoming, Atomic Habits, The Alchemist)
- "classic": timeless literature (To Kill a Mockingbird, The Great Gatsby)
- "adventure": action, journeys (Life of Pi, The Hobbit, Dune)
- "sad": emotional, tragic (The Fault in Our Stars, The Book Thief)
- "funny": humor, light-hearted (The Thursday Murder Club, The Hobbit)

Respond with JSON only, no other text, in exactly this shape:
[
  {
    "id": "1",
    "bookId": "<id from the catalog>",
    "reason": "Two or three sentences tying the request to this book's themes and mood.",
    "confidence": 0.95
  }
]

Rules:
- Return between 2 and 4 recommendations.
- Only use bookId values that appear in the catalog above.
- Confidence must be between 0.7 and 1.0, higher for better matches.
- Prefer fewer strong matches over many weak ones."#;

/// Build the librarian prompt embedding the whole catalog and the user query.
pub fn build_prompt(catalog: &Catalog, query: &str) -> String {
    let books = catalog
        .books()
        .iter()
        .map(|book| {
            format!(
                "- ID: {}, Title: \"{}\" by {} ({}): {}",
                book.id, book.title, book.author, book.genre, book.description
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are an expert librarian with deep knowledge of literature and reader preferences.
Recommend books from the catalog below that truly match the reader's request.

Available Books Catalog:
{books}

User Request: "{query}"
{LIBRARIAN_INSTRUCTIONS}"#
    )
}
