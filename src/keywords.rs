// Interest-profile vocabulary. These tables define what "relevant" means for
// the scoring engine; all matching against them is case-insensitive.

/// Target job titles. An exact title match earns the full title weight.
pub const JOB_TITLES: &[&str] = &[
    "AI Engineer",
    "ML Engineer",
    "Machine Learning Engineer",
    "GenAI Engineer",
    "Generative AI Engineer",
    "LLM Engineer",
    "NLP Engineer",
    "Data Scientist",
    "MLOps Engineer",
    "AI/ML Engineer",
    "Deep Learning Engineer",
    "Computer Vision Engineer",
    "RAG Engineer",
    "AI Solutions Engineer",
    "AI Research Engineer",
    "Applied ML Engineer",
    "Python AI Developer",
    "AI Researcher",
    "ML Scientist",
    "Machine Learning Scientist",
    "AI Platform Engineer",
    "AI Infrastructure Engineer",
    "Conversational AI Engineer",
    "Applied Scientist",
    "Research Scientist",
];

/// Domain-signal words for partial title credit when no target title matches.
pub const TITLE_SIGNAL_WORDS: &[&str] = &[
    "ai", "ml", "machine", "learning", "deep", "nlp", "data", "scientist",
    "engineer", "genai", "llm", "rag", "computer", "vision", "mlops",
];

/// Target regions. The first entries are aliases that collapse to the UK.
pub const TARGET_LOCATIONS: &[&str] = &[
    "UK",
    "United Kingdom",
    "Great Britain",
    "London",
    "Greater London",
    "City of London",
    "Cambridge",
    "Manchester",
    "Edinburgh",
    "Birmingham",
    "Bristol",
    "Hertfordshire",
    "Hatfield",
    "Leeds",
    "Glasgow",
    "Belfast",
    "Oxford",
    "Reading",
    "Southampton",
    "Nottingham",
    "Sheffield",
    "Liverpool",
    "England",
    "Scotland",
    "Wales",
];

pub const REMOTE_TERMS: &[&str] = &["remote", "hybrid", "work from home", "anywhere"];

// Skills with tier weights: primary=3, secondary=2, tertiary=1.

pub const PRIMARY_SKILLS: &[&str] = &[
    "Python",
    "PyTorch",
    "TensorFlow",
    "LangChain",
    "RAG",
    "LLM",
    "Generative AI",
    "Hugging Face",
    "Transformers",
    "OpenAI",
    "NLP",
    "Deep Learning",
    "Neural Networks",
    "Computer Vision",
    "Prompt Engineering",
];

pub const SECONDARY_SKILLS: &[&str] = &[
    "Scikit-learn",
    "Keras",
    "AWS",
    "SageMaker",
    "Bedrock",
    "Docker",
    "Kubernetes",
    "FastAPI",
    "ChromaDB",
    "FAISS",
    "OpenSearch",
    "Redis",
    "pgvector",
    "Gemini",
    "Agentic AI",
    "LLM fine-tuning",
    "Fine-tuning",
];

pub const TERTIARY_SKILLS: &[&str] = &[
    "CI/CD",
    "MLflow",
    "Git",
    "Linux",
    "n8n",
    "Data Pipelines",
    "ETL",
    "Feature Engineering",
    "S3",
    "CloudWatch",
    "Machine Learning",
];

/// Visa/sponsorship phrases. Plain substring containment, no word boundary.
pub const VISA_KEYWORDS: &[&str] = &[
    "visa sponsorship",
    "sponsorship",
    "right to work",
    "work permit",
    "visa",
    "sponsored",
    "tier 2",
    "skilled worker visa",
];

/// Relevance pre-filter used by broad adapters: a posting must mention at
/// least one of these somewhere in title/description/tags to be kept.
pub const RELEVANCE_KEYWORDS: &[&str] = &[
    "ai", "ml", "machine learning", "deep learning", "nlp",
    "natural language", "computer vision", "data scien",
    "generative", "llm", "large language", "neural",
    "pytorch", "tensorflow", "python", "rag", "langchain",
    "transformers", "hugging face",
    "mlops", "genai", "openai", "anthropic", "bedrock", "sagemaker",
    "prompt engineer", "agentic", "vector database", "embeddings",
    "fine-tun", "chatgpt", "gpt-4", "claude", "gemini", "diffusion",
    "reinforcement learning",
];

/// Unrelated-role title phrases. First match subtracts a flat 30 points.
pub const NEGATIVE_TITLE_KEYWORDS: &[&str] = &[
    "sales engineer", "account manager", "marketing", "recruiter",
    "accountant", "hr manager", "graphic designer", "copywriter",
    "customer support", "civil engineer", "mechanical engineer",
    "nurse", "pharmacist", "teaching assistant", "lecturer",
    // Sales / business
    "sales specialist", "sales representative", "business development",
    "account executive",
    // IT ops
    "site reliability", "sre ", "support desk", "help desk",
    "service desk", "network engineer", "systems administrator",
    "desktop support", "it support",
    // Unrelated research
    "quantum", "virology", "bioinformatics", "genomics",
    // Creative
    "model artist", "3d artist", "3d modeler", "animator",
    // Enterprise platforms
    "power platform", "dynamics 365", "sharepoint", "sap ",
    "oracle erp", "salesforce admin",
    // Legacy
    "mainframe", "cobol", "rpg developer",
    // Hardware
    "embedded firmware", "hvac",
    // Non-tech engineering
    "electrical engineer", "chemical engineer",
    // Healthcare
    "doctor", "physician", "dentist",
    // Legal
    "legal counsel", "solicitor", "paralegal", "barrister",
    // Finance
    "auditor", "tax ", "bookkeeper",
    // Education
    "teacher",
];

/// Non-target countries/cities. A location naming one of these with no target
/// or remote term costs a flat 15 points; empty locations are never penalized.
pub const FOREIGN_LOCATIONS: &[&str] = &[
    "united states", "usa", "u.s.", "new york", "san francisco",
    "seattle", "austin", "boston", "chicago", "los angeles",
    "canada", "toronto", "vancouver",
    "germany", "berlin", "munich", "france", "paris",
    "netherlands", "amsterdam", "spain", "madrid", "barcelona",
    "italy", "milan", "poland", "warsaw", "portugal", "lisbon",
    "switzerland", "zurich", "ireland", "dublin", "sweden", "stockholm",
    "india", "bangalore", "bengaluru", "mumbai", "hyderabad", "pune",
    "singapore", "japan", "tokyo", "china", "shanghai", "hong kong",
    "australia", "sydney", "melbourne",
    "brazil", "mexico", "dubai", "israel", "tel aviv",
];
