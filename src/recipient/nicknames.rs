//! Nickname and relationship lookup tables
//!
//! Maps casual references ("liz", "mom") onto the formal names and relationship
//! labels recipients are usually saved under. The tables are static data: they
//! are indexed once on first use and never written afterwards, so lookups are
//! safe from any number of threads without locking.

use lazy_static::lazy_static;
use std::collections::HashMap;

use super::normalizer::normalize_name;

/// Common nicknames and the formal name each one is short for.
pub const NICKNAME_PAIRS: &[(&str, &str)] = &[
    ("abe", "abraham"), ("al", "albert"), ("alex", "alexander"), ("allie", "allison"),
    ("andy", "andrew"), ("angie", "angela"), ("annie", "anne"), ("ari", "ariel"),
    ("art", "arthur"),
    ("barb", "barbara"), ("bart", "bartholomew"), ("bea", "beatrice"), ("becca", "rebecca"),
    ("becky", "rebecca"), ("ben", "benjamin"), ("benny", "benjamin"), ("bert", "albert"),
    ("beth", "elizabeth"), ("betty", "elizabeth"), ("bev", "beverly"), ("bill", "william"),
    ("billy", "william"), ("bob", "robert"), ("bobby", "robert"), ("brad", "bradley"),
    ("bri", "brianna"), ("brit", "brittany"),
    ("cal", "calvin"), ("cam", "cameron"), ("carly", "caroline"), ("carol", "caroline"),
    ("carrie", "caroline"), ("cass", "cassandra"), ("cassie", "cassandra"),
    ("cat", "catherine"), ("cate", "catherine"), ("cath", "catherine"), ("cathy", "catherine"),
    ("chad", "chadwick"), ("charlie", "charles"), ("chaz", "charles"), ("chip", "charles"),
    ("chris", "christopher"), ("christie", "christine"), ("christy", "christine"),
    ("chuck", "charles"), ("cindy", "cynthia"), ("cj", "christopher"), ("connie", "constance"),
    ("daf", "dafydd"), ("dan", "daniel"), ("danny", "daniel"), ("dave", "david"),
    ("davy", "david"), ("deb", "deborah"), ("debbie", "deborah"), ("dee", "diana"),
    ("del", "delores"), ("dex", "dexter"), ("di", "diana"), ("dick", "richard"),
    ("dina", "deanna"), ("don", "donald"), ("donna", "madonna"), ("donnie", "donald"),
    ("dottie", "dorothy"), ("doug", "douglas"), ("drew", "andrew"),
    ("ed", "edward"), ("eddie", "edward"), ("eddy", "edward"), ("eli", "elijah"),
    ("eliza", "elizabeth"), ("ellie", "eleanor"), ("em", "emily"), ("emma", "emily"),
    ("emmy", "emily"), ("eric", "frederick"), ("ernie", "ernest"), ("evie", "evelyn"),
    ("fanny", "frances"), ("flo", "florence"), ("fran", "frances"), ("frank", "francis"),
    ("frankie", "francis"), ("fred", "frederick"), ("freddie", "frederick"),
    ("fritz", "frederick"),
    ("gabe", "gabriel"), ("gail", "abigail"), ("gene", "eugene"), ("gerry", "gerald"),
    ("gil", "gilbert"), ("gina", "regina"), ("ginny", "virginia"), ("greg", "gregory"),
    ("gus", "augustus"),
    ("hank", "henry"), ("harry", "harold"), ("helen", "helena"),
    ("ike", "isaac"), ("izzy", "isabella"),
    ("jack", "john"), ("jackie", "jacqueline"), ("jake", "jacob"), ("jamie", "james"),
    ("jan", "janet"), ("jane", "janet"), ("jay", "jason"), ("jaz", "jasmine"),
    ("jazz", "jasmine"), ("jb", "john"), ("jd", "john"), ("jeff", "jeffrey"),
    ("jen", "jennifer"), ("jenna", "jennifer"), ("jenny", "jennifer"), ("jer", "jeremy"),
    ("jerry", "gerald"), ("jess", "jessica"), ("jessie", "jessica"), ("jim", "james"),
    ("jimmy", "james"), ("jo", "joanne"), ("joe", "joseph"), ("joey", "joseph"),
    ("jon", "jonathan"), ("josh", "joshua"), ("jude", "judith"), ("judy", "judith"),
    ("jules", "julia"), ("julie", "julia"),
    ("kat", "katherine"), ("kate", "katherine"), ("kath", "katherine"), ("katie", "katherine"),
    ("kathy", "katherine"), ("kay", "katherine"), ("ken", "kenneth"), ("kenny", "kenneth"),
    ("kev", "kevin"), ("kim", "kimberly"), ("kit", "katherine"), ("kitty", "katherine"),
    ("kris", "kristina"), ("krissy", "kristina"),
    ("larry", "lawrence"), ("laura", "laurence"), ("laurie", "laurence"), ("len", "leonard"),
    ("lenny", "leonard"), ("leo", "leonard"), ("les", "leslie"), ("lester", "leslie"),
    ("lew", "lewis"), ("lex", "alexander"), ("liam", "william"), ("lib", "elizabeth"),
    ("libby", "elizabeth"), ("lil", "lillian"), ("lilly", "lillian"), ("linda", "melinda"),
    ("liz", "elizabeth"), ("liza", "elizabeth"), ("lizzie", "elizabeth"),
    ("lizzy", "elizabeth"), ("lou", "louise"), ("louie", "louis"), ("luce", "lucy"),
    ("lucy", "lucille"), ("luke", "lucas"),
    ("mac", "mackenzie"), ("maddie", "madeline"), ("maddy", "madeline"), ("mag", "margaret"),
    ("maggie", "margaret"), ("mandy", "amanda"), ("marc", "marcus"), ("marcy", "marcia"),
    ("marge", "margaret"), ("margie", "margaret"), ("marty", "martin"), ("mat", "matthew"),
    ("matt", "matthew"), ("matty", "matthew"), ("max", "maxwell"), ("maxie", "maxwell"),
    ("meg", "margaret"), ("mel", "melissa"), ("mia", "maria"), ("mick", "michael"),
    ("mickey", "michael"), ("mike", "michael"), ("mikey", "michael"), ("milly", "mildred"),
    ("mindy", "melinda"), ("minnie", "minerva"), ("missy", "melissa"), ("mitch", "mitchell"),
    ("mo", "maureen"), ("molly", "mary"), ("monty", "montgomery"),
    ("nan", "nancy"), ("nance", "nancy"), ("nancy", "anne"), ("nat", "nathan"),
    ("natalie", "natalya"), ("nate", "nathan"), ("ned", "edward"), ("nell", "eleanor"),
    ("nelly", "eleanor"), ("nick", "nicholas"), ("nicky", "nicholas"), ("nina", "antonina"),
    ("nora", "eleanor"),
    ("ollie", "oliver"),
    ("pat", "patricia"), ("patsy", "patricia"), ("patty", "patricia"), ("peg", "margaret"),
    ("peggy", "margaret"), ("penny", "penelope"), ("pete", "peter"), ("phil", "philip"),
    ("polly", "mary"),
    ("randy", "randall"), ("ray", "raymond"), ("ree", "marie"), ("reg", "reginald"),
    ("rich", "richard"), ("richie", "richard"), ("rick", "richard"), ("ricky", "richard"),
    ("rob", "robert"), ("robbie", "robert"), ("rocky", "rockwell"), ("rod", "rodney"),
    ("roger", "rodger"), ("ron", "ronald"), ("ronnie", "ronald"), ("rosie", "rose"),
    ("roxy", "roxanne"), ("roy", "leroy"), ("russ", "russell"),
    ("sal", "salvador"), ("sally", "sarah"), ("sam", "samuel"), ("sammie", "samantha"),
    ("sammy", "samuel"), ("sandy", "sandra"), ("sara", "sarah"), ("sasha", "alexander"),
    ("scott", "prescott"), ("sean", "john"), ("shawn", "shawna"), ("shelly", "michelle"),
    ("sheri", "sheryl"), ("sherry", "sheryl"), ("sid", "sidney"), ("sly", "sylvester"),
    ("stacy", "anastasia"), ("stan", "stanley"), ("steve", "stephen"), ("stevie", "stephen"),
    ("stu", "stuart"), ("sue", "susan"), ("suzie", "susan"), ("suzy", "susan"),
    ("syd", "sydney"),
    ("tam", "tamara"), ("tammy", "tamara"), ("ted", "theodore"), ("teddy", "theodore"),
    ("terri", "teresa"), ("terry", "terence"), ("tess", "teresa"), ("theo", "theodore"),
    ("tia", "tiana"), ("tiff", "tiffany"), ("tim", "timothy"), ("timmy", "timothy"),
    ("tina", "christina"), ("toby", "tobias"), ("tom", "thomas"), ("tommy", "thomas"),
    ("tony", "anthony"), ("tori", "victoria"), ("tracey", "teresa"), ("tracy", "teresa"),
    ("trey", "terrence"), ("trina", "catherine"), ("trish", "patricia"), ("trisha", "patricia"),
    ("val", "valentine"), ("vicky", "victoria"), ("vinnie", "vincent"), ("vinny", "vincent"),
    ("walt", "walter"), ("will", "william"), ("willie", "william"), ("willy", "william"),
    ("zach", "zachary"), ("zack", "zachary"), ("zee", "zelda"),
];

/// Relationship labels and the casual terms people use for them.
pub const RELATIONSHIP_SYNONYMS: &[(&str, &[&str])] = &[
    ("mother", &["mom", "mama", "mommy", "ma", "mum", "mummy", "mother"]),
    ("father", &["dad", "daddy", "papa", "pa", "pop", "father", "pops"]),
    ("sister", &["sis", "sister", "sissy"]),
    ("brother", &["bro", "brother", "bruh"]),
    (
        "grandmother",
        &["grandma", "granny", "nana", "nanna", "gram", "grammy", "grandmother", "gma"],
    ),
    ("grandfather", &["grandpa", "gramps", "pap", "grandfather", "gpa"]),
    ("wife", &["wife", "wifey"]),
    ("husband", &["husband", "hubby"]),
    ("spouse", &["spouse", "partner"]),
    ("daughter", &["daughter"]),
    ("son", &["son", "boy"]),
    ("aunt", &["aunt", "auntie", "aunty"]),
    ("uncle", &["uncle"]),
    ("cousin", &["cousin", "cuz"]),
    ("niece", &["niece"]),
    ("nephew", &["nephew"]),
    ("friend", &["friend", "buddy", "pal", "bestie", "bff"]),
];

lazy_static! {
    static ref NICKNAME_TO_FORMAL: HashMap<&'static str, &'static str> =
        NICKNAME_PAIRS.iter().copied().collect();

    static ref FORMAL_TO_NICKNAMES: HashMap<&'static str, Vec<&'static str>> = {
        let mut map: HashMap<&'static str, Vec<&'static str>> = HashMap::new();
        for (nickname, formal) in NICKNAME_PAIRS {
            map.entry(*formal).or_default().push(*nickname);
        }
        for nicknames in map.values_mut() {
            nicknames.sort_unstable();
        }
        map
    };

    static ref RELATIONSHIP_LOOKUP: HashMap<&'static str, &'static str> = {
        let mut map = HashMap::new();
        for (canonical, synonyms) in RELATIONSHIP_SYNONYMS {
            map.insert(*canonical, *canonical);
            for synonym in synonyms.iter() {
                // First label wins for terms shared between relationships
                map.entry(*synonym).or_insert(*canonical);
            }
        }
        map
    };
}

/// Formal name for a nickname, if the nickname is known.
///
/// ```
/// use recipient_matcher::recipient::nicknames::formal_name;
///
/// assert_eq!(formal_name("Liz"), Some("elizabeth"));
/// assert_eq!(formal_name("elizabeth"), None);
/// ```
pub fn formal_name(nickname: &str) -> Option<&'static str> {
    NICKNAME_TO_FORMAL
        .get(normalize_name(nickname).as_str())
        .copied()
}

pub fn is_nickname(name: &str) -> bool {
    formal_name(name).is_some()
}

/// All known nicknames for a formal name, alphabetically.
pub fn nicknames_for(formal: &str) -> Vec<&'static str> {
    FORMAL_TO_NICKNAMES
        .get(normalize_name(formal).as_str())
        .cloned()
        .unwrap_or_default()
}

/// Whether one name is a listed nickname of the other, in either direction.
///
/// Both arguments must already be normalized. Two nicknames that share a
/// formal name ("bob", "bobby") are not aliases of each other.
pub fn are_aliases(a: &str, b: &str) -> bool {
    if a.is_empty() || b.is_empty() || a == b {
        return false;
    }
    NICKNAME_TO_FORMAL.get(a) == Some(&b) || NICKNAME_TO_FORMAL.get(b) == Some(&a)
}

/// Canonical relationship label for a casual term ("mom" -> "mother").
pub fn normalize_relationship(term: &str) -> Option<&'static str> {
    RELATIONSHIP_LOOKUP
        .get(normalize_name(term).as_str())
        .copied()
}

pub fn is_relationship_term(term: &str) -> bool {
    normalize_relationship(term).is_some()
}
