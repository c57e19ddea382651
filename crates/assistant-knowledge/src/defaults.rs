//! Built-in Giggs Assistant configuration.

use std::collections::BTreeMap;

use crate::{AssistantConfig, KnowledgeEntry, RouteAction, Theme};

/// Default simulated "thinking" delay before a reply appears.
pub const DEFAULT_REPLY_DELAY_MS: u64 = 1000;

pub(crate) fn default_config() -> AssistantConfig {
    AssistantConfig {
        name: "Giggs Assistant".to_string(),
        greeting: "Hey! 👋 I'm your virtual assistant. Ask me about our services, projects, \
                   or anything else. How can I help you today?"
            .to_string(),
        theme: Theme::default(),
        routes: default_routes(),
        quick_replies: strings(&["👋 Hi there!", "🛡️ Cybersecurity", "🚀 Products", "📞 Contact"]),
        knowledge: default_knowledge(),
        fallbacks: strings(&[
            "Hmm, I'm not quite sure about that. Can you rephrase? I can help with services, \
             cybersecurity (Mihawk), and products.",
            "I'm still learning! Try asking about our Mihawk platform or our core engineering \
             services.",
        ]),
        reply_delay_ms: DEFAULT_REPLY_DELAY_MS,
    }
}

pub(crate) fn default_theme() -> Theme {
    Theme {
        primary: "#22d3ee".to_string(),
        primary_dark: "#0891b2".to_string(),
        accent: "#3b82f6".to_string(),
        success: "#10b981".to_string(),
    }
}

fn default_routes() -> BTreeMap<String, RouteAction> {
    [
        ("services", "/services", "Our Services", "🛠️"),
        ("cybersecurity", "/services/cybersecurity", "Cybersecurity", "🛡️"),
        ("projects", "/products", "View Products", "🚀"),
        ("contact", "/contact", "Contact Us", "📞"),
        ("careers", "/careers", "Careers", "💼"),
        ("about", "/about", "About Us", "ℹ️"),
    ]
    .into_iter()
    .map(|(key, url, label, icon)| {
        (
            key.to_string(),
            RouteAction {
                url: url.to_string(),
                label: label.to_string(),
                icon: icon.to_string(),
            },
        )
    })
    .collect()
}

// Order is precedence: greetings before company info before topic entries.
fn default_knowledge() -> Vec<KnowledgeEntry> {
    vec![
        entry(
            &[
                "hello", "hi", "hey", "how are you", "greetings", "good morning",
                "good afternoon", "good evening", "yo", "sup", "hola", "namaste",
            ],
            &[
                "Hello! 👋 How can I assist you today?",
                "Hi there! What can I help you with?",
                "Hey! I'm here to help. What do you need?",
                "Welcome to Giggs Software Labs! How can I help you today?",
                "I'm Giggs Assistant, your virtual AI assistant. How can I help you today?",
                "Greetings! Ready to talk tech? How can I assist?",
            ],
            None,
        ),
        entry(
            &[
                "what is giggs", "about giggs", "who are you", "what is this company",
                "tell me about giggs", "who is giggs", "what is giggs software labs",
                "company info", "history", "mission", "vision", "values", "philosophy",
                "giggs labs",
            ],
            &[
                "Giggs Software Labs is an elite engineering firm specializing in AI, \
                 Cybersecurity, and High-Performance Software. We build the future for global \
                 clients.",
                "We are a team of expert engineers and designers dedicated to pushing the \
                 boundaries of technology. From Mihawk to custom AI, we deliver excellence.",
                "Our mission is to solve complex engineering challenges with elegant, secure, \
                 and scalable solutions for forward-thinking enterprises.",
            ],
            Some("about"),
        ),
        entry(
            &[
                "mihawk", "security", "cyber", "protection", "threat", "soc", "hacking",
                "firewall", "antivirus", "cybersecurity", "vulnerability", "pentest",
                "penetration testing", "encryption", "iso", "compliance", "malware",
                "ransomware", "ddos",
            ],
            &[
                "Mihawk is our elite, AI-driven cybersecurity platform providing 24/7 autonomous \
                 protection. It's designed to stop threats before they happen. Our security \
                 stack is world-class.",
                "We take security seriously. From architectural audits to Mihawk's real-time \
                 monitoring, we protect your digital assets with military-grade precision.",
            ],
            Some("cybersecurity"),
        ),
        entry(
            &[
                "service", "services", "offer", "what do you do", "expertise",
                "what do you offer", "capabilities", "solutions", "what can you do for me",
                "specialty", "tech stack", "technologies", "what do you have", "what you have",
            ],
            &["We offer high-end solutions in: \n1. AI & Data Science \n2. Elite Cybersecurity \
               (Mihawk) \n3. High-Performance Web/App Engineering \n4. Automation & DevOps. \n\n\
               Check out our full catalog to see how we can accelerate your business."],
            Some("services"),
        ),
        entry(
            &[
                "project", "projects", "work", "portfolio", "clients", "case studies",
                "what have you built", "examples", "track record", "past work", "experience",
                "product", "products",
            ],
            &["We've delivered high-impact solutions globally, from fintech platforms to \
               AI-driven security systems. Take a look at our featured products to see our \
               engineering in action!"],
            Some("projects"),
        ),
        entry(
            &[
                "job", "jobs", "careers", "hiring", "apply", "work at giggs", "internship",
                "position", "opening", "vacancy", "culture", "benefits", "salary", "remote",
                "developer job",
            ],
            &["We are always looking for elite talent! If you are a top-tier engineer or \
               designer who loves solving hard problems, we want to hear from you. Check our \
               current openings."],
            Some("careers"),
        ),
        entry(
            &[
                "price", "pricing", "cost", "how much", "quote", "estimation", "rate", "budget",
                "billing", "expensive", "cheap", "financials",
            ],
            &["Our pricing is tailored to the complexity and scale of your engineering needs. \
               We focus on ROI and high-impact delivery. Let's discuss your project setup to \
               give you an accurate quote!"],
            Some("contact"),
        ),
        entry(
            &[
                "contact", "reach", "email", "phone", "talk", "address", "location", "office",
                "support", "help desk", "sales", "inquiry", "meeting", "call",
            ],
            &["I'd be happy to connect you with our team! You can reach us via our contact \
               page, drop an email, or even schedule a strategy call. How would you like to \
               proceed?"],
            Some("contact"),
        ),
        entry(
            &[
                "ai", "artificial intelligence", "ml", "machine learning", "data science", "llm",
                "automation", "gpt", "gemini", "neural network", "deep learning", "nlp",
                "chatbot", "genai", "generative ai",
            ],
            &[
                "AI is at the heart of everything we do. We build custom LLM integrations, \
                 predictive analytics, and automated workflows to accelerate businesses and \
                 provide a competitive edge.",
                "Our AI expertise ranges from large-scale data processing to fine-tuning \
                 generative models for specific enterprise use-cases.",
            ],
            None,
        ),
        entry(
            &[
                "web", "website", "app", "application", "development", "react", "nextjs",
                "backend", "frontend", "mobile", "ios", "android", "deployment", "cloud", "aws",
                "azure", "google cloud", "scalability", "vultr",
            ],
            &["We build lightning-fast, secure, and scalable web and mobile applications using \
               modern stacks like Next.js, Python, and cloud-native architectures. Performance \
               is our top priority."],
            None,
        ),
        entry(
            &[
                "performance", "fast", "speed", "optimization", "efficiency", "legacy",
                "migration", "slow", "loading", "latency",
            ],
            &["Elite performance is a Giggs core pillar. We optimize everything from database \
               queries to frontend bundle sizes to ensure a frictionless user experience."],
            None,
        ),
        entry(
            &[
                "automating", "workflow", "cycle", "ci/cd", "pipeline", "devops", "kubernetes",
                "docker", "infrastructure", "terraforming",
            ],
            &["We automate the mundane to focus on the monumental. Our DevOps and CI/CD \
               strategies reduce time-to-market while increasing deployment reliability."],
            None,
        ),
        entry(
            &[
                "quality", "qa", "testing", "bug", "issue", "error", "reliable", "trust",
                "guarantee",
            ],
            &["Quality is non-negotiable at Giggs. We use automated testing, rigorous code \
               reviews, and elite architectural patterns to ensure every delivery is \
               bulletproof."],
            None,
        ),
        entry(
            &[
                "thanks", "thank you", "appreciate", "helpful", "thx", "cool", "awesome",
                "great", "perfect", "good bot", "nice",
            ],
            &[
                "You're very welcome! Happy to help! 😊",
                "Anytime! Let me know if you need anything else.",
                "Glad I could help. Is there anything else you'd like to know about Giggs?",
                "My pleasure! I'm here 24/7 if you have more questions.",
            ],
            None,
        ),
        entry(
            &[
                "bye", "goodbye", "see you", "ciao", "later", "stop", "exit", "quit", "leave",
            ],
            &[
                "Goodbye! Come back anytime you need help. 👋",
                "See you later! Have a great day! ✨",
                "Adios! Wishing you a productive day ahead.",
            ],
            None,
        ),
    ]
}

fn entry(keywords: &[&str], responses: &[&str], action: Option<&str>) -> KnowledgeEntry {
    KnowledgeEntry {
        keywords: strings(keywords),
        responses: strings(responses),
        action: action.map(str::to_string),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
