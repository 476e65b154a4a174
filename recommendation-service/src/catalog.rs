use serde::Serialize;

/// A catalog entry available for recommendation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Book {
    pub id: &'static str,
    pub title: &'static str,
    pub author: &'static str,
    pub genre: &'static str,
    pub description: &'static str,
    /// Display metadata; only the books the web client renders as cards have it.
    #[serde(flatten)]
    pub details: Option<BookDetails>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDetails {
    pub cover_image: &'static str,
    pub rating: f64,
    pub published_year: u16,
    pub isbn: &'static str,
}

/// Read-only view over a fixed set of books.
///
/// Cheap to copy; the books themselves are `'static` and never change while
/// the process runs.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    books: &'static [Book],
}

impl Catalog {
    pub const fn new(books: &'static [Book]) -> Self {
        Self { books }
    }

    /// The catalog the service ships with.
    pub const fn builtin() -> Self {
        Self::new(BOOKS)
    }

    pub fn books(&self) -> &'static [Book] {
        self.books
    }

    pub fn find(&self, id: &str) -> Option<&'static Book> {
        self.books.iter().find(|book| book.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

pub static BOOKS: &[Book] = &[
    Book {
        id: "1",
        title: "The Midnight Library",
        author: "Matt Haig",
        genre: "Fiction",
        description: "A novel about life, death, and all the lives in between.",
        details: Some(BookDetails {
            cover_image: "/book-covers/midnight-library.jpg",
            rating: 4.5,
            published_year: 2020,
            isbn: "978-0525559474",
        }),
    },
    Book {
        id: "2",
        title: "Project Hail Mary",
        author: "Andy Weir",
        genre: "Science Fiction",
        description: "A lone astronaut must save humanity in this thrilling space adventure.",
        details: Some(BookDetails {
            cover_image: "/book-covers/project-hail-mary.jpg",
            rating: 4.8,
            published_year: 2021,
            isbn: "978-0593135204",
        }),
    },
    Book {
        id: "3",
        title: "The Silent Patient",
        author: "Alex Michaelides",
        genre: "Mystery",
        description: "A woman shoots her husband and then never speaks again.",
        details: Some(BookDetails {
            cover_image: "/book-covers/silent-patient.jpg",
            rating: 4.3,
            published_year: 2019,
            isbn: "978-1250301697",
        }),
    },
    Book {
        id: "4",
        title: "People We Meet on Vacation",
        author: "Emily Henry",
        genre: "Romance",
        description: "Two best friends. Ten summer trips. One last chance to fall in love.",
        details: Some(BookDetails {
            cover_image: "/book-covers/people-we-meet.jpg",
            rating: 4.2,
            published_year: 2021,
            isbn: "978-1984806758",
        }),
    },
    Book {
        id: "5",
        title: "Atomic Habits",
        author: "James Clear",
        genre: "Self-Help",
        description: "An easy and proven way to build good habits and break bad ones.",
        details: Some(BookDetails {
            cover_image: "/book-covers/atomic-habits.jpg",
            rating: 4.7,
            published_year: 2018,
            isbn: "978-0735211292",
        }),
    },
    Book {
        id: "6",
        title: "The Seven Husbands of Evelyn Hugo",
        author: "Taylor Jenkins Reid",
        genre: "Fiction",
        description: "A reclusive Hollywood icon finally tells her story.",
        details: Some(BookDetails {
            cover_image: "/book-covers/evelyn-hugo.jpg",
            rating: 4.6,
            published_year: 2017,
            isbn: "978-1501161933",
        }),
    },
    Book {
        id: "7",
        title: "Dune",
        author: "Frank Herbert",
        genre: "Science Fiction",
        description: "Epic space opera set on the desert planet Arrakis.",
        details: Some(BookDetails {
            cover_image: "/book-covers/dune.jpg",
            rating: 4.4,
            published_year: 1965,
            isbn: "978-0441172719",
        }),
    },
    Book {
        id: "8",
        title: "The Thursday Murder Club",
        author: "Richard Osman",
        genre: "Mystery",
        description: "Four unlikely friends investigate unsolved killings.",
        details: Some(BookDetails {
            cover_image: "/book-covers/thursday-murder-club.jpg",
            rating: 4.1,
            published_year: 2020,
            isbn: "978-1984880987",
        }),
    },
    Book {
        id: "9",
        title: "Educated",
        author: "Tara Westover",
        genre: "Memoir",
        description: "A memoir about education, family, and the struggle for self-invention.",
        details: Some(BookDetails {
            cover_image: "/book-covers/educated.jpg",
            rating: 4.5,
            published_year: 2018,
            isbn: "978-0399590504",
        }),
    },
    Book {
        id: "10",
        title: "The Song of Achilles",
        author: "Madeline Miller",
        genre: "Fiction",
        description: "A brilliant reimagining of Homer's Iliad.",
        details: Some(BookDetails {
            cover_image: "/book-covers/song-of-achilles.jpg",
            rating: 4.6,
            published_year: 2011,
            isbn: "978-0062060624",
        }),
    },
    Book {
        id: "11",
        title: "Where the Crawdads Sing",
        author: "Delia Owens",
        genre: "Fiction",
        description: "The story of the mysterious \"Marsh Girl\" and a murder case.",
        details: Some(BookDetails {
            cover_image: "/book-covers/crawdads-sing.jpg",
            rating: 4.4,
            published_year: 2018,
            isbn: "978-0735219090",
        }),
    },
    Book {
        id: "12",
        title: "The Invisible Life of Addie LaRue",
        author: "V.E. Schwab",
        genre: "Fantasy",
        description: "A woman cursed to be forgotten by everyone she meets.",
        details: Some(BookDetails {
            cover_image: "/book-covers/addie-larue.jpg",
            rating: 4.3,
            published_year: 2020,
            isbn: "978-0765387561",
        }),
    },
    Book {
        id: "13",
        title: "Circe",
        author: "Madeline Miller",
        genre: "Fantasy",
        description: "The story of the Greek goddess Circe.",
        details: Some(BookDetails {
            cover_image: "/book-covers/circe.jpg",
            rating: 4.5,
            published_year: 2018,
            isbn: "978-0316556347",
        }),
    },
    Book {
        id: "14",
        title: "The Alchemist",
        author: "Paulo Coelho",
        genre: "Fiction",
        description: "The mystical story of Santiago, an Andalusian shepherd boy.",
        details: Some(BookDetails {
            cover_image: "/book-covers/alchemist.jpg",
            rating: 4.2,
            published_year: 1988,
            isbn: "978-0062315007",
        }),
    },
    Book {
        id: "15",
        title: "The Handmaid's Tale",
        author: "Margaret Atwood",
        genre: "Dystopian",
        description: "A dystopian tale of a totalitarian society.",
        details: Some(BookDetails {
            cover_image: "/book-covers/handmaids-tale.jpg",
            rating: 4.1,
            published_year: 1985,
            isbn: "978-0385490818",
        }),
    },
    Book {
        id: "16",
        title: "Normal People",
        author: "Sally Rooney",
        genre: "Fiction",
        description: "The complex relationship between Connell and Marianne.",
        details: Some(BookDetails {
            cover_image: "/book-covers/normal-people.jpg",
            rating: 4.0,
            published_year: 2018,
            isbn: "978-1984822178",
        }),
    },
    Book {
        id: "17",
        title: "The Kite Runner",
        author: "Khaled Hosseini",
        genre: "Fiction",
        description: "A story of friendship and redemption in Afghanistan.",
        details: Some(BookDetails {
            cover_image: "/book-covers/kite-runner.jpg",
            rating: 4.3,
            published_year: 2003,
            isbn: "978-1594631931",
        }),
    },
    Book {
        id: "18",
        title: "Gone Girl",
        author: "Gillian Flynn",
        genre: "Thriller",
        description: "A psychological thriller about a missing wife.",
        details: Some(BookDetails {
            cover_image: "/book-covers/gone-girl.jpg",
            rating: 4.2,
            published_year: 2012,
            isbn: "978-0307588371",
        }),
    },
    Book {
        id: "19",
        title: "The Great Gatsby",
        author: "F. Scott Fitzgerald",
        genre: "Classic",
        description: "The story of Jay Gatsby and the American Dream.",
        details: Some(BookDetails {
            cover_image: "/book-covers/great-gatsby.jpg",
            rating: 3.9,
            published_year: 1925,
            isbn: "978-0743273565",
        }),
    },
    Book {
        id: "20",
        title: "The Fault in Our Stars",
        author: "John Green",
        genre: "Young Adult",
        description: "A love story between two teenagers with cancer.",
        details: Some(BookDetails {
            cover_image: "/book-covers/fault-in-stars.jpg",
            rating: 4.3,
            published_year: 2012,
            isbn: "978-0525478812",
        }),
    },
    Book {
        id: "21",
        title: "Becoming",
        author: "Michelle Obama",
        genre: "Biography",
        description: "Michelle Obama's memoir of her life and experiences.",
        details: Some(BookDetails {
            cover_image: "/book-covers/becoming.jpg",
            rating: 4.6,
            published_year: 2018,
            isbn: "978-1524763138",
        }),
    },
    Book {
        id: "22",
        title: "The Hobbit",
        author: "J.R.R. Tolkien",
        genre: "Fantasy",
        description: "The adventure of Bilbo Baggins in Middle-earth.",
        details: Some(BookDetails {
            cover_image: "/book-covers/hobbit.jpg",
            rating: 4.7,
            published_year: 1937,
            isbn: "978-0547928227",
        }),
    },
    Book {
        id: "23",
        title: "The Girl with the Dragon Tattoo",
        author: "Stieg Larsson",
        genre: "Thriller",
        description: "A journalist and hacker investigate a disappearance.",
        details: Some(BookDetails {
            cover_image: "/book-covers/dragon-tattoo.jpg",
            rating: 4.1,
            published_year: 2005,
            isbn: "978-0307454546",
        }),
    },
    Book {
        id: "24",
        title: "The Catcher in the Rye",
        author: "J.D. Salinger",
        genre: "Classic",
        description: "The story of Holden Caulfield, a troubled teenager.",
        details: Some(BookDetails {
            cover_image: "/book-covers/catcher-rye.jpg",
            rating: 3.8,
            published_year: 1951,
            isbn: "978-0316769174",
        }),
    },
    Book {
        id: "25",
        title: "Harry Potter and the Sorcerer's Stone",
        author: "J.K. Rowling",
        genre: "Fantasy",
        description: "The beginning of Harry Potter's magical journey.",
        details: Some(BookDetails {
            cover_image: "/book-covers/harry-potter-1.jpg",
            rating: 4.8,
            published_year: 1997,
            isbn: "978-0439708180",
        }),
    },
    Book {
        id: "26",
        title: "To Kill a Mockingbird",
        author: "Harper Lee",
        genre: "Classic",
        description: "A story of racial injustice in the American South.",
        details: Some(BookDetails {
            cover_image: "/book-covers/mockingbird.jpg",
            rating: 4.3,
            published_year: 1960,
            isbn: "978-0061120084",
        }),
    },
    Book {
        id: "27",
        title: "The Book Thief",
        author: "Markus Zusak",
        genre: "Historical Fiction",
        description: "A story narrated by Death during Nazi Germany.",
        details: Some(BookDetails {
            cover_image: "/book-covers/book-thief.jpg",
            rating: 4.4,
            published_year: 2005,
            isbn: "978-0375842207",
        }),
    },
    Book {
        id: "28",
        title: "Pride and Prejudice",
        author: "Jane Austen",
        genre: "Classic",
        description: "The romance between Elizabeth Bennet and Mr. Darcy.",
        details: Some(BookDetails {
            cover_image: "/book-covers/pride-prejudice.jpg",
            rating: 4.2,
            published_year: 1813,
            isbn: "978-0141439518",
        }),
    },
    Book {
        id: "29",
        title: "The Hunger Games",
        author: "Suzanne Collins",
        genre: "Dystopian",
        description: "Katniss Everdeen fights in a deadly televised competition.",
        details: Some(BookDetails {
            cover_image: "/book-covers/hunger-games.jpg",
            rating: 4.3,
            published_year: 2008,
            isbn: "978-0439023481",
        }),
    },
    Book {
        id: "30",
        title: "Life of Pi",
        author: "Yann Martel",
        genre: "Adventure",
        description: "A boy survives on a lifeboat with a Bengal tiger.",
        details: Some(BookDetails {
            cover_image: "/book-covers/life-of-pi.jpg",
            rating: 4.0,
            published_year: 2001,
            isbn: "978-0156027328",
        }),
    },
    Book {
        id: "31",
        title: "The Seven Moons of Maali Almeida",
        author: "Shehan Karunatilaka",
        genre: "Fantasy",
        description: "A darkly comic fantasy about a photographer who wakes up dead.",
        details: None,
    },
    Book {
        id: "32",
        title: "Klara and the Sun",
        author: "Kazuo Ishiguro",
        genre: "Science Fiction",
        description: "A story told from the perspective of an artificial friend.",
        details: None,
    },
    Book {
        id: "33",
        title: "The Thursday Murder Club",
        author: "Richard Osman",
        genre: "Mystery",
        description: "Four unlikely friends meet weekly to investigate cold cases.",
        details: None,
    },
    Book {
        id: "34",
        title: "Mexican Gothic",
        author: "Silvia Moreno-Garcia",
        genre: "Horror",
        description: "A Victorian Gothic horror set in 1950s Mexico.",
        details: None,
    },
    Book {
        id: "35",
        title: "The Sanatorium",
        author: "Sarah Pearse",
        genre: "Thriller",
        description: "A detective investigates murders at a remote Swiss hotel.",
        details: None,
    },
    Book {
        id: "36",
        title: "It Ends with Us",
        author: "Colleen Hoover",
        genre: "Romance",
        description: "A powerful story about love, resilience, and difficult choices.",
        details: None,
    },
    Book {
        id: "37",
        title: "Verity",
        author: "Colleen Hoover",
        genre: "Thriller",
        description: "A psychological thriller about a writer and dark secrets.",
        details: None,
    },
    Book {
        id: "38",
        title: "The Guest List",
        author: "Lucy Foley",
        genre: "Mystery",
        description: "A wedding on a remote island turns deadly.",
        details: None,
    },
    Book {
        id: "39",
        title: "The Midnight Girls",
        author: "Alicia Jasinska",
        genre: "Fantasy",
        description: "A dark fairy tale inspired by Slavic folklore.",
        details: None,
    },
    Book {
        id: "40",
        title: "Beach Read",
        author: "Emily Henry",
        genre: "Romance",
        description: "Two rival writers challenge each other to write outside their genres.",
        details: None,
    },
    Book {
        id: "41",
        title: "The Invisible Bridge",
        author: "Julie Orringer",
        genre: "Historical Fiction",
        description: "A sweeping novel set during World War II.",
        details: None,
    },
    Book {
        id: "42",
        title: "Anxious People",
        author: "Fredrik Backman",
        genre: "Fiction",
        description: "A heartwarming story about a failed bank robbery.",
        details: None,
    },
    Book {
        id: "43",
        title: "The Priory of the Orange Tree",
        author: "Samantha Shannon",
        genre: "Fantasy",
        description: "An epic fantasy featuring dragons and ancient magic.",
        details: None,
    },
    Book {
        id: "44",
        title: "Circe",
        author: "Madeline Miller",
        genre: "Fantasy",
        description: "The story of the Greek goddess Circe and her transformation.",
        details: None,
    },
    Book {
        id: "45",
        title: "The Poppy War",
        author: "R.F. Kuang",
        genre: "Fantasy",
        description: "A grimdark military fantasy inspired by 20th-century China.",
        details: None,
    },
    Book {
        id: "46",
        title: "The Atlas Six",
        author: "Olivie Blake",
        genre: "Fantasy",
        description: "Six young magicians compete for a place in an ancient society.",
        details: None,
    },
    Book {
        id: "47",
        title: "Project Hail Mary",
        author: "Andy Weir",
        genre: "Science Fiction",
        description: "A lone astronaut must save humanity.",
        details: None,
    },
    Book {
        id: "48",
        title: "The Invisible Life of Addie LaRue",
        author: "V.E. Schwab",
        genre: "Fantasy",
        description: "A woman cursed to be forgotten by everyone she meets.",
        details: None,
    },
    Book {
        id: "49",
        title: "The House in the Cerulean Sea",
        author: "TJ Klune",
        genre: "Fantasy",
        description: "A heartwarming fantasy about found family and acceptance.",
        details: None,
    },
    Book {
        id: "50",
        title: "The Starless Sea",
        author: "Erin Morgenstern",
        genre: "Fantasy",
        description: "A magical tale of stories within stories.",
        details: None,
    },
    Book {
        id: "51",
        title: "The Binding",
        author: "Bridget Collins",
        genre: "Fantasy",
        description: "A world where books are used to erase painful memories.",
        details: None,
    },
    Book {
        id: "52",
        title: "The Water Dancer",
        author: "Ta-Nehisi Coates",
        genre: "Historical Fiction",
        description: "A powerful story of slavery and magical realism.",
        details: None,
    },
    Book {
        id: "53",
        title: "The Vanishing Half",
        author: "Brit Bennett",
        genre: "Fiction",
        description: "Twin sisters choose to live in different worlds.",
        details: None,
    },
    Book {
        id: "54",
        title: "Such a Fun Age",
        author: "Kiley Reid",
        genre: "Fiction",
        description: "A story about race, privilege, and good intentions.",
        details: None,
    },
    Book {
        id: "55",
        title: "The Midnight Library",
        author: "Matt Haig",
        genre: "Fiction",
        description: "A novel about life, death, and infinite possibilities.",
        details: None,
    },
    Book {
        id: "56",
        title: "The Four Winds",
        author: "Kristin Hannah",
        genre: "Historical Fiction",
        description: "A story of resilience during the Great Depression.",
        details: None,
    },
    Book {
        id: "57",
        title: "The Nightingale",
        author: "Kristin Hannah",
        genre: "Historical Fiction",
        description: "Two sisters in Nazi-occupied France.",
        details: None,
    },
    Book {
        id: "58",
        title: "Eleanor Oliphant Is Completely Fine",
        author: "Gail Honeyman",
        genre: "Fiction",
        description: "A quirky woman learns to connect with others.",
        details: None,
    },
    Book {
        id: "59",
        title: "A Man Called Ove",
        author: "Fredrik Backman",
        genre: "Fiction",
        description: "A grumpy man finds unexpected friendship.",
        details: None,
    },
    Book {
        id: "60",
        title: "The Subtle Art of Not Giving a F*ck",
        author: "Mark Manson",
        genre: "Self-Help",
        description: "A counterintuitive approach to living a good life.",
        details: None,
    },
    Book {
        id: "61",
        title: "Sapiens",
        author: "Yuval Noah Harari",
        genre: "Non-Fiction",
        description: "A brief history of humankind.",
        details: None,
    },
    Book {
        id: "62",
        title: "The Alchemist",
        author: "Paulo Coelho",
        genre: "Fiction",
        description: "A shepherd boy's journey to find treasure.",
        details: None,
    },
    Book {
        id: "63",
        title: "Big Little Lies",
        author: "Liane Moriarty",
        genre: "Mystery",
        description: "Secrets and lies in a seaside town.",
        details: None,
    },
    Book {
        id: "64",
        title: "The Girl on the Train",
        author: "Paula Hawkins",
        genre: "Thriller",
        description: "A psychological thriller about obsession and memory.",
        details: None,
    },
    Book {
        id: "65",
        title: "Little Fires Everywhere",
        author: "Celeste Ng",
        genre: "Fiction",
        description: "Secrets ignite in a picture-perfect suburb.",
        details: None,
    },
    Book {
        id: "66",
        title: "The Hate U Give",
        author: "Angie Thomas",
        genre: "Young Adult",
        description: "A powerful story about finding your voice.",
        details: None,
    },
    Book {
        id: "67",
        title: "Children of Blood and Bone",
        author: "Tomi Adeyemi",
        genre: "Fantasy",
        description: "A girl fights to restore magic to her oppressed people.",
        details: None,
    },
    Book {
        id: "68",
        title: "The Cruel Prince",
        author: "Holly Black",
        genre: "Fantasy",
        description: "A mortal girl navigates the treacherous High Court of Faerie.",
        details: None,
    },
    Book {
        id: "69",
        title: "Red Queen",
        author: "Victoria Aveyard",
        genre: "Dystopian",
        description: "In a world divided by blood, a girl discovers she has a deadly power.",
        details: None,
    },
    Book {
        id: "70",
        title: "Six of Crows",
        author: "Leigh Bardugo",
        genre: "Fantasy",
        description: "A crew of criminals attempts an impossible heist.",
        details: None,
    },
];
