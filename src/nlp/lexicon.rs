//! Closed-class word lists for English.

use std::collections::HashSet;
use std::sync::LazyLock;

fn set(words: &'static [&'static str]) -> HashSet<&'static str> {
    words.iter().copied().collect()
}

pub(crate) static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    set(&[
        "a", "about", "above", "across", "after", "afterwards", "again", "against", "all",
        "almost", "alone", "along", "already", "also", "although", "always", "am", "among",
        "amongst", "an", "and", "another", "any", "anyhow", "anyone", "anything", "anyway",
        "anywhere", "are", "around", "as", "at", "back", "be", "became", "because", "become",
        "becomes", "becoming", "been", "before", "beforehand", "behind", "being", "below",
        "beside", "besides", "between", "beyond", "both", "but", "by", "can", "cannot",
        "could", "did", "do", "does", "doing", "done", "down", "due", "during", "each",
        "either", "else", "elsewhere", "enough", "even", "ever", "every", "everyone",
        "everything", "everywhere", "except", "few", "first", "for", "former", "formerly",
        "from", "further", "had", "has", "have", "he", "hence", "her", "here", "hereafter",
        "hereby", "herein", "hers", "herself", "him", "himself", "his", "how", "however", "i",
        "if", "in", "indeed", "into", "is", "it", "its", "itself", "just", "last", "latter",
        "least", "less", "made", "make", "many", "may", "me", "meanwhile", "might", "mine",
        "more", "moreover", "most", "mostly", "much", "must", "my", "myself", "namely",
        "neither", "never", "nevertheless", "next", "no", "nobody", "none", "nor", "not",
        "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only",
        "onto", "or", "other", "others", "otherwise", "our", "ours", "ourselves", "out",
        "over", "own", "per", "perhaps", "please", "put", "quite", "rather", "really", "same",
        "see", "seem", "seemed", "seeming", "seems", "several", "she", "should", "show",
        "since", "so", "some", "somehow", "someone", "something", "sometime", "sometimes",
        "somewhere", "still", "such", "take", "than", "that", "the", "their", "them",
        "themselves", "then", "thence", "there", "thereafter", "thereby", "therefore",
        "therein", "these", "they", "this", "those", "though", "through", "throughout",
        "thru", "thus", "to", "together", "too", "toward", "towards", "under", "unless",
        "until", "up", "upon", "us", "used", "using", "various", "very", "via", "was", "we",
        "well", "were", "what", "whatever", "when", "whence", "whenever", "where",
        "whereas", "whereby", "wherein", "whether", "which", "while", "whither", "who",
        "whoever", "whole", "whom", "whose", "why", "will", "with", "within", "without",
        "would", "yet", "you", "your", "yours", "yourself", "yourselves",
    ])
});

pub(crate) static DETERMINERS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    set(&[
        "a", "an", "the", "this", "that", "these", "those", "each", "every", "some", "any",
        "no", "another", "either", "neither", "all", "both", "my", "your", "his", "her",
        "its", "our", "their", "whose", "which", "what",
    ])
});

pub(crate) static PRONOUNS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    set(&[
        "i", "me", "you", "he", "him", "she", "it", "we", "us", "they", "them", "myself",
        "yourself", "himself", "herself", "itself", "ourselves", "themselves", "who", "whom",
        "someone", "something", "anyone", "anything", "everyone", "everything", "nobody",
        "nothing", "mine", "yours", "hers", "ours", "theirs",
    ])
});

pub(crate) static ADPOSITIONS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    set(&[
        "of", "in", "on", "at", "by", "for", "with", "from", "to", "into", "onto", "about",
        "above", "below", "under", "over", "between", "among", "through", "during", "before",
        "after", "against", "without", "within", "across", "along", "around", "behind",
        "beyond", "despite", "toward", "towards", "upon", "via", "per", "like", "near",
    ])
});

pub(crate) static COORDINATORS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| set(&["and", "or", "but", "nor", "yet", "so", "plus"]));

pub(crate) static SUBORDINATORS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    set(&[
        "because", "although", "though", "while", "whereas", "if", "unless", "since", "until",
        "when", "whenever", "where", "whether", "than", "that", "once",
    ])
});

pub(crate) static AUXILIARIES: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    set(&[
        "be", "am", "is", "are", "was", "were", "been", "being", "have", "has", "had", "do",
        "does", "did", "will", "would", "shall", "should", "can", "could", "may", "might",
        "must",
    ])
});

pub(crate) static PARTICLES: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| set(&["not", "n't", "to", "'s"]));

pub(crate) static ADVERBS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    set(&[
        "also", "very", "too", "quite", "rather", "often", "always", "never", "sometimes",
        "here", "there", "now", "then", "thus", "however", "therefore", "moreover", "still",
        "already", "just", "even", "only", "again", "soon", "almost", "perhaps", "indeed",
    ])
});

/// Frequent verbs whose form carries no verbal suffix.
pub(crate) static BASE_VERBS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    set(&[
        "show", "shows", "use", "uses", "find", "finds", "found", "make", "makes", "made",
        "take", "takes", "took", "give", "gives", "gave", "provide", "provides", "suggest",
        "suggests", "present", "presents", "describe", "describes", "propose", "proposes",
        "argue", "argues", "indicate", "indicates", "demonstrate", "demonstrates", "require",
        "requires", "include", "includes", "increase", "increases", "reduce", "reduces",
        "become", "becomes", "became", "remain", "remains", "seem", "seems", "consider",
        "considers", "explain", "explains", "report", "reports", "examine", "examines",
        "compare", "compares", "affect", "affects", "allow", "allows", "help", "helps",
        "lead", "leads", "led", "know", "knows", "knew", "think", "thinks", "thought", "see",
        "sees", "saw", "get", "gets", "got", "go", "goes", "went", "come", "comes", "came",
        "say", "says", "said", "tell", "tells", "told", "keep", "keeps", "kept", "begin",
        "begins", "began", "run", "runs", "ran", "write", "writes", "wrote", "read", "reads",
    ])
});

pub(crate) static ABBREVIATIONS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    set(&[
        "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "e.g", "i.e", "cf", "al",
        "fig", "figs", "eq", "eqs", "no", "nos", "vol", "vols", "pp", "p", "ch", "sec",
        "approx", "dept", "univ", "inc", "ltd", "co", "corp", "jan", "feb", "mar", "apr",
        "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec", "ed", "eds", "rev", "est",
    ])
});

pub(crate) static HONORIFICS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| set(&["mr", "mrs", "ms", "dr", "prof", "sir", "madam", "lady", "lord"]));

pub(crate) static ORG_SUFFIXES: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    set(&[
        "university", "institute", "college", "inc", "corporation", "corp", "company", "ltd",
        "association", "society", "foundation", "agency", "department", "ministry", "council",
        "laboratory", "press", "group", "organization", "organisation", "bank", "school",
    ])
});
