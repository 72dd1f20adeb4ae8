//! Bundled content used on first start and whenever the stored document is
//! missing or unreadable.

use folio_types::{
    BlogPost, Contact, Experience, ItemId, Package, PortfolioDocument, Profile, Project,
    ProjectCategory, SkillCategory,
};

fn labels(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The bundled default document.
pub fn default_document() -> PortfolioDocument {
    PortfolioDocument {
        profile: Profile {
            name: "Alex Morgan".into(),
            role: "Fullstack Developer & Software Engineer".into(),
            bio: "Developer focused on robust, scalable software: microservice \
                  architecture, workflow automation and applied AI integration."
                .into(),
            resume_url: "/cv.pdf".into(),
            contact: Contact {
                email: "alex.morgan@example.com".into(),
                phone: "+1 555 0100".into(),
                github: "alex-morgan".into(),
                linkedin: "alex-morgan".into(),
                address: "Lisbon, Portugal".into(),
            },
        },
        skills: vec![
            SkillCategory {
                title: "Frontend & Mobile".into(),
                skills: labels(&["Next.js", "React", "Vue.js", "Flutter", "React Native", "TypeScript", "Tailwind CSS"]),
            },
            SkillCategory {
                title: "Backend & API".into(),
                skills: labels(&["Node.js", "Bun", "NestJS", "Fastify", "Go", "Python", "gRPC", "GraphQL", "WebSockets"]),
            },
            SkillCategory {
                title: "Data & Infrastructure".into(),
                skills: labels(&["PostgreSQL", "MongoDB", "Redis", "Elasticsearch", "Docker", "Kubernetes", "CI/CD"]),
            },
            SkillCategory {
                title: "Specialties".into(),
                skills: labels(&["AI/ML (LLM, NLP)", "Automation (n8n)", "Payments", "Security (OWASP, RBAC)"]),
            },
        ],
        experiences: vec![
            Experience {
                id: ItemId::new("experience-nexus"),
                company: "Nexus Corporation".into(),
                role: "Fullstack Developer & Software Architect".into(),
                period: "Aug 2025 - Present".into(),
                location: "Lisbon, Portugal".into(),
                description: "Design and delivery of a modular investment platform and its mobile app.".into(),
                tasks: labels(&[
                    "Microservice architecture (Next.js, Node.js, PostgreSQL, Redis)",
                    "Cross-platform mobile development with React Native",
                    "End-to-end encrypted payment flows",
                ]),
            },
            Experience {
                id: ItemId::new("experience-ubuntu"),
                company: "Ubuntu Consulting".into(),
                role: "Software Engineer & Automation Specialist".into(),
                period: "Feb 2025 - Oct 2025".into(),
                location: "Remote".into(),
                description: "B2B SaaS products and intelligent automation platforms.".into(),
                tasks: labels(&[
                    "AI-assisted B2B prospecting platform",
                    "Automated campaigns with n8n",
                ]),
            },
        ],
        projects: vec![
            Project {
                id: ItemId::new("project-prospect-pro"),
                title: "Prospect-Pro AI".into(),
                description: "AI-driven B2B prospecting platform built with Next.js and Python.".into(),
                stack: labels(&["Next.js", "TypeScript", "Python", "PostgreSQL", "OpenAI"]),
                demo_url: Some("https://prospect-pro.example.com".into()),
                source_url: None,
                image: Some("https://images.example.com/prospect-pro.jpg".into()),
                category: ProjectCategory::Professional,
                featured: true,
            },
            Project {
                id: ItemId::new("project-servcraft"),
                title: "ServCraft".into(),
                description: "Node.js backend framework with native RBAC support and audit logs.".into(),
                stack: labels(&["TypeScript", "Fastify", "Prisma", "PostgreSQL"]),
                demo_url: None,
                source_url: Some("https://github.com/alex-morgan/servcraft".into()),
                image: Some("https://images.example.com/servcraft.jpg".into()),
                category: ProjectCategory::OpenSource,
                featured: true,
            },
            Project {
                id: ItemId::new("project-runweek"),
                title: "RunWeek".into(),
                description: "Connected sports tracking with wearable integrations.".into(),
                stack: labels(&["React", "Node.js", "IoT API"]),
                demo_url: Some("https://runweek.example.com".into()),
                source_url: None,
                image: None,
                category: ProjectCategory::Personal,
                featured: false,
            },
        ],
        packages: vec![
            Package {
                name: "@alex-morgan/n8n-nodes-mailwizz".into(),
                version: "1.0.1".into(),
                downloads: Some("25K+".into()),
            },
            Package {
                name: "n8n-nodes-gpt-oss".into(),
                version: "0.1.0".into(),
                downloads: None,
            },
        ],
        blog_posts: vec![
            BlogPost {
                id: ItemId::new("blog-security"),
                title: "Security: the OWASP Top 10 and code audits".into(),
                excerpt: "Applying security principles from the design phase onward.".into(),
                body: "Security is never an afterthought.\n\n\
                       ### Role based access control\n\
                       A small middleware keeps role checks in one place:\n\n\
                       ```typescript\n\
                       export const checkRole = (roles: string[]) => {\n  \
                         return async (req, reply) => {\n    \
                           if (!roles.includes(req.user.role)) {\n      \
                             return reply.status(403).send({ error: 'Forbidden' });\n    \
                           }\n  \
                         };\n\
                       };\n\
                       ```\n\n\
                       - Validate every input\n\
                       - Encrypt sensitive data at rest"
                    .into(),
                date: "10 July 2025".into(),
                category: "Security".into(),
                tags: labels(&["Security", "Architecture", "Best Practices"]),
                read_time: "10 min".into(),
                image: "https://images.example.com/security.jpg".into(),
            },
            BlogPost {
                id: ItemId::new("blog-nextjs-rsc"),
                title: "React Server Components with Next.js".into(),
                excerpt: "A deep dive into server components and frontend performance.".into(),
                body: "Server Components change how we think about React.\n\n\
                       ## Benefits\n\
                       - Less JavaScript shipped to the client\n\
                       - Direct data access on the server"
                    .into(),
                date: "15 August 2025".into(),
                category: "Frontend".into(),
                tags: labels(&["Next.js", "React", "Performance"]),
                read_time: "8 min".into(),
                image: "https://images.example.com/rsc.jpg".into(),
            },
            BlogPost {
                id: ItemId::new("blog-bun-grpc"),
                title: "Microservices: Bun, gRPC and high performance".into(),
                excerpt: "Why some critical services moved from Node.js to Bun over gRPC.".into(),
                body: "Startup time and network latency matter in a microservice mesh.\n\n\
                       ### Protobuf definition\n\n\
                       ```protobuf\n\
                       service PaymentService {\n  \
                         rpc ProcessPayment (PaymentRequest) returns (PaymentResponse) {}\n\
                       }\n\
                       ```"
                    .into(),
                date: "2 September 2025".into(),
                category: "Backend".into(),
                tags: labels(&["Bun", "gRPC", "Microservices", "Architecture"]),
                read_time: "12 min".into(),
                image: "https://images.example.com/grpc.jpg".into(),
            },
            BlogPost {
                id: ItemId::new("blog-ai-agents"),
                title: "Building autonomous AI agents".into(),
                excerpt: "Integrating LLMs into assistants that act, not only answer.".into(),
                body: "Agents use tools, browse and automate whole workflows.".into(),
                date: "20 September 2025".into(),
                category: "AI".into(),
                tags: labels(&["AI", "LLM", "Automation"]),
                read_time: "15 min".into(),
                image: "https://images.example.com/agents.jpg".into(),
            },
        ],
        lead_requests: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn defaults_have_unique_ids_everywhere() {
        let doc = default_document();
        for collection in folio_types::Collection::ALL {
            let ids = doc.ids_of(collection);
            let unique: HashSet<_> = ids.iter().collect();
            assert_eq!(unique.len(), ids.len(), "duplicate id in {collection}");
            assert!(ids.iter().all(|id| !id.is_blank()));
        }
    }

    #[test]
    fn defaults_roundtrip_through_json() {
        let doc = default_document();
        let json = serde_json::to_string(&doc).unwrap();
        let parsed: PortfolioDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, doc);
    }
}
