use crate::model::{
    Difficulty, Lesson, LessonId, Module, ModuleDraft, ModuleError, ModuleId, Percent,
};

/// `(id, title, description, duration, completed, locked)`
type LessonRow = (u64, &'static str, &'static str, &'static str, bool, bool);

fn lessons(rows: &[LessonRow]) -> Vec<Lesson> {
    rows.iter()
        .map(|&(id, title, description, duration, completed, locked)| {
            Lesson::new(LessonId::new(id), title, description, duration)
                .with_completed(completed)
                .with_locked(locked)
        })
        .collect()
}

fn objectives(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| (*item).to_owned()).collect()
}

pub(super) fn modules() -> Result<Vec<Module>, ModuleError> {
    [
        email_basics(),
        video_calls(),
        online_banking(),
        social_media(),
        online_shopping(),
        health_services(),
    ]
    .into_iter()
    .map(ModuleDraft::validate)
    .collect()
}

fn email_basics() -> ModuleDraft {
    ModuleDraft {
        id: ModuleId::new(1),
        title: "Email Basics".into(),
        description: "Learn to send, receive, and organize emails safely".into(),
        detailed_description: "Master the fundamentals of email communication. This module will \
            teach you how to create, send, and manage emails confidently and securely. You'll \
            learn best practices for staying safe online while communicating with friends, \
            family, and businesses."
            .into(),
        difficulty: Difficulty::Beginner,
        estimated_time: "2 hours".into(),
        icon: "\u{1F4E7}".into(),
        color: "#0052A3".into(),
        objectives: objectives(&[
            "Create and send emails with attachments",
            "Organize your inbox with folders and labels",
            "Identify and avoid email scams",
            "Manage your contacts effectively",
            "Use email safely and securely",
        ]),
        lessons: lessons(&[
            (1, "Getting Started with Email", "Create your first email account and explore the interface", "15 min", true, false),
            (2, "Composing Your First Email", "Learn to write and send professional emails", "20 min", true, false),
            (3, "Reading and Replying", "Check your inbox and respond to messages", "15 min", true, false),
            (4, "Managing Attachments", "Send and receive files safely via email", "20 min", true, false),
            (5, "Organizing Your Inbox", "Create folders and use labels to stay organized", "15 min", false, false),
            (6, "Email Safety & Security", "Recognize phishing attempts and spam", "20 min", false, false),
            (7, "Managing Contacts", "Build and organize your address book", "10 min", false, true),
            (8, "Advanced Email Features", "Signatures, auto-replies, and filters", "15 min", false, true),
        ]),
        progress: Percent::clamped(45),
    }
}

fn video_calls() -> ModuleDraft {
    ModuleDraft {
        id: ModuleId::new(2),
        title: "Video Calls".into(),
        description: "Connect with family and friends through video chat".into(),
        detailed_description: "Stay connected with loved ones through video calling. Learn how \
            to use popular video chat platforms to see and hear family and friends, no matter \
            where they are in the world."
            .into(),
        difficulty: Difficulty::Beginner,
        estimated_time: "1.5 hours".into(),
        icon: "\u{1F4F9}".into(),
        color: "#007A00".into(),
        objectives: objectives(&[
            "Set up and test your camera and microphone",
            "Join and host video calls",
            "Use screen sharing features",
            "Manage call settings for best quality",
            "Troubleshoot common video call issues",
        ]),
        lessons: lessons(&[
            (1, "Introduction to Video Calls", "Understanding video calling platforms", "10 min", true, false),
            (2, "Setting Up Your Equipment", "Test your camera, microphone, and speakers", "15 min", false, false),
            (3, "Making Your First Call", "Start a video call with someone", "20 min", false, false),
            (4, "Joining Group Calls", "Participate in family video chats", "15 min", false, true),
            (5, "Screen Sharing Basics", "Share your screen during a call", "15 min", false, true),
            (6, "Troubleshooting Tips", "Fix common audio and video problems", "15 min", false, true),
        ]),
        progress: Percent::clamped(20),
    }
}

fn online_banking() -> ModuleDraft {
    ModuleDraft {
        id: ModuleId::new(3),
        title: "Online Banking".into(),
        description: "Manage your finances securely from home".into(),
        detailed_description: "Take control of your finances from the comfort of home. Learn \
            how to safely access your bank account online, pay bills, transfer money, and \
            monitor your transactions."
            .into(),
        difficulty: Difficulty::Intermediate,
        estimated_time: "3 hours".into(),
        icon: "\u{1F3E6}".into(),
        color: "#5B21B6".into(),
        objectives: objectives(&[
            "Log in to online banking securely",
            "Check account balances and transactions",
            "Transfer money between accounts",
            "Pay bills online safely",
            "Set up alerts and notifications",
        ]),
        lessons: lessons(&[
            (1, "Online Banking Overview", "What is online banking and why use it?", "15 min", false, false),
            (2, "Creating Your Online Account", "Set up secure access to your bank", "20 min", false, false),
            (3, "Logging In Securely", "Use strong passwords and two-factor authentication", "15 min", false, true),
            (4, "Viewing Your Accounts", "Check balances and transaction history", "15 min", false, true),
            (5, "Transferring Money", "Move funds between your accounts", "20 min", false, true),
            (6, "Paying Bills Online", "Set up and manage bill payments", "25 min", false, true),
            (7, "Setting Up Alerts", "Get notified about account activity", "15 min", false, true),
            (8, "Mobile Banking Apps", "Access your bank from your phone", "20 min", false, true),
            (9, "Avoiding Banking Scams", "Stay safe from fraud and phishing", "20 min", false, true),
            (10, "Best Practices & Tips", "Maintain secure online banking habits", "15 min", false, true),
        ]),
        progress: Percent::ZERO,
    }
}

fn social_media() -> ModuleDraft {
    ModuleDraft {
        id: ModuleId::new(4),
        title: "Social Media".into(),
        description: "Stay connected and share moments with loved ones".into(),
        detailed_description: "Connect with friends and family on social media platforms. \
            Learn how to share photos, write posts, and interact with others while maintaining \
            your privacy and security."
            .into(),
        difficulty: Difficulty::Beginner,
        estimated_time: "2.5 hours".into(),
        icon: "\u{1F310}".into(),
        color: "#0891B2".into(),
        objectives: objectives(&[
            "Create and manage your social media profile",
            "Share photos and updates safely",
            "Connect with friends and family",
            "Adjust privacy settings",
            "Recognize and avoid social media scams",
        ]),
        lessons: lessons(&[
            (1, "Introduction to Social Media", "Overview of popular platforms", "15 min", true, false),
            (2, "Creating Your Profile", "Set up your account and add information", "20 min", true, false),
            (3, "Finding Friends & Family", "Connect with people you know", "15 min", true, false),
            (4, "Posting Updates", "Share text, photos, and thoughts", "20 min", true, false),
            (5, "Sharing Photos", "Upload and tag photos from events", "20 min", true, false),
            (6, "Commenting & Reacting", "Engage with others' posts", "15 min", true, false),
            (7, "Privacy Settings", "Control who sees your content", "20 min", false, false),
            (8, "Social Media Safety", "Avoid scams and protect your information", "20 min", false, true),
            (9, "Groups & Communities", "Join groups with shared interests", "15 min", false, true),
        ]),
        progress: Percent::clamped(60),
    }
}

fn online_shopping() -> ModuleDraft {
    ModuleDraft {
        id: ModuleId::new(5),
        title: "Online Shopping".into(),
        description: "Shop safely and conveniently from your device".into(),
        detailed_description: "Discover the convenience of online shopping while staying safe. \
            Learn how to find products, compare prices, make secure purchases, and track your \
            orders."
            .into(),
        difficulty: Difficulty::Intermediate,
        estimated_time: "2 hours".into(),
        icon: "\u{1F6D2}".into(),
        color: "#DC2626".into(),
        objectives: objectives(&[
            "Browse and search for products online",
            "Compare prices and read reviews",
            "Add items to cart and checkout securely",
            "Track orders and manage returns",
            "Identify trustworthy online retailers",
        ]),
        lessons: lessons(&[
            (1, "Getting Started with Online Shopping", "Benefits and overview of e-commerce", "15 min", true, false),
            (2, "Finding Products", "Search and browse online stores", "20 min", false, false),
            (3, "Reading Reviews & Comparisons", "Make informed purchasing decisions", "20 min", false, true),
            (4, "Creating Store Accounts", "Set up accounts for faster checkout", "15 min", false, true),
            (5, "Secure Checkout Process", "Enter payment info safely", "20 min", false, true),
            (6, "Tracking Your Orders", "Monitor shipping and delivery", "15 min", false, true),
            (7, "Returns & Customer Service", "Handle issues with your orders", "15 min", false, true),
        ]),
        progress: Percent::clamped(10),
    }
}

fn health_services() -> ModuleDraft {
    ModuleDraft {
        id: ModuleId::new(6),
        title: "Health Services".into(),
        description: "Access telehealth and manage medical appointments".into(),
        detailed_description: "Take advantage of digital health services. Learn how to \
            schedule appointments online, participate in telehealth visits, access medical \
            records, and manage prescriptions from home."
            .into(),
        difficulty: Difficulty::Intermediate,
        estimated_time: "2.5 hours".into(),
        icon: "\u{1F3E5}".into(),
        color: "#059669".into(),
        objectives: objectives(&[
            "Schedule medical appointments online",
            "Join telehealth video consultations",
            "Access your medical records",
            "Manage prescriptions and refills",
            "Use health tracking apps",
        ]),
        lessons: lessons(&[
            (1, "Introduction to Digital Health", "Overview of online health services", "15 min", false, false),
            (2, "Patient Portal Basics", "Access your medical information online", "20 min", false, false),
            (3, "Scheduling Appointments", "Book doctor visits online", "20 min", false, true),
            (4, "Preparing for Telehealth", "Set up for a virtual doctor visit", "20 min", false, true),
            (5, "During Your Telehealth Visit", "Tips for successful video consultations", "20 min", false, true),
            (6, "Managing Prescriptions", "Refill and track medications online", "20 min", false, true),
            (7, "Health Tracking Apps", "Monitor your health data digitally", "20 min", false, true),
            (8, "Privacy & Security in Healthcare", "Protect your health information", "15 min", false, true),
        ]),
        progress: Percent::ZERO,
    }
}
