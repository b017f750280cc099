//! Static page content.
//!
//! Plain data, deserializable from the `content` key of a config file. The
//! `Default` impls carry the sample portfolio shown when no config is given.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortfolioContent {
    pub owner: Owner,
    pub intros: SectionIntros,
    pub about: About,
    pub skills: Vec<SkillCategory>,
    /// One-line strengths shown under the skill bars.
    pub highlights: Vec<String>,
    pub projects: Vec<Project>,
    pub resume: Resume,
    pub contact: ContactInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Owner {
    pub name: String,
    pub greeting: String,
    pub intro: String,
    pub resume_url: String,
    pub footer_tagline: String,
    pub copyright: String,
}

/// Lead paragraphs under each section heading. About uses
/// [`About::summary`] instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionIntros {
    pub skills: String,
    pub projects: String,
    pub resume: String,
    pub contact: String,
}

impl Default for SectionIntros {
    fn default() -> Self {
        Self {
            skills: "A comprehensive toolkit built through years of hands-on experience and \
                     continuous learning in modern web development."
                .into(),
            projects: "A collection of projects that showcase my expertise in modern web \
                       development, from concept to deployment."
                .into(),
            resume: "Explore my professional journey and download my complete resume".into(),
            contact: "Ready to bring your ideas to life? Let's collaborate and create something \
                      amazing together. I'm always excited to work on new projects and challenges."
                .into(),
        }
    }
}

impl Default for Owner {
    fn default() -> Self {
        Self {
            name: "John Doe".into(),
            greeting: "Hi, I'm".into(),
            intro: "I craft exceptional digital experiences through innovative web solutions. \
                    Passionate about creating beautiful, functional, and user-centric applications."
                .into(),
            resume_url: "/resume.pdf".into(),
            footer_tagline: "Building the future, one line of code at a time.".into(),
            copyright: "© 2024 John Doe. All rights reserved.".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct About {
    pub summary: String,
    /// "My Journey" paragraphs.
    pub journey: Vec<String>,
    pub achievements: Vec<Achievement>,
    pub focus_areas: Vec<FocusArea>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub number: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusArea {
    pub title: String,
    pub description: String,
}

impl Default for About {
    fn default() -> Self {
        let achievement = |number: &str, label: &str| Achievement {
            number: number.into(),
            label: label.into(),
        };
        let focus = |title: &str, description: &str| FocusArea {
            title: title.into(),
            description: description.into(),
        };
        Self {
            summary: "I'm a passionate developer who loves creating digital experiences that make \
                      a difference. With a focus on clean code and innovative solutions, I turn \
                      ideas into reality."
                .into(),
            journey: vec![
                "Started my journey in web development 3 years ago with a simple \"Hello World\" \
                 and never looked back. What began as curiosity has evolved into a passionate \
                 career in creating meaningful digital experiences."
                    .into(),
                "I specialize in React, Node.js, and modern web technologies. I believe in \
                 writing clean, maintainable code and creating applications that not only \
                 function perfectly but also provide exceptional user experiences."
                    .into(),
                "When I'm not coding, you'll find me exploring new technologies, contributing \
                 to open source projects, or mentoring aspiring developers in the community."
                    .into(),
            ],
            achievements: vec![
                achievement("50+", "Projects Completed"),
                achievement("3+", "Years Experience"),
                achievement("20+", "Happy Clients"),
                achievement("∞", "Lines of Code"),
            ],
            focus_areas: vec![
                focus(
                    "Full Stack Development",
                    "Building end-to-end applications with modern technologies and best practices.",
                ),
                focus(
                    "UI/UX Design",
                    "Creating intuitive and beautiful user interfaces that enhance user experience.",
                ),
                focus(
                    "Performance Optimization",
                    "Optimizing applications for speed, efficiency, and scalability.",
                ),
                focus(
                    "Team Collaboration",
                    "Working effectively in agile teams and leading development initiatives.",
                ),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub title: String,
    pub skills: Vec<Skill>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    /// Proficiency in percent; values above 100 render as a full bar.
    pub level: u8,
}

impl Skill {
    pub fn fraction(&self) -> f64 {
        f64::from(self.level.min(100)) / 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    pub featured: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resume {
    pub summary: String,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub title: String,
    pub company: String,
    pub location: String,
    pub period: String,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub degree: String,
    pub school: String,
    pub location: String,
    pub period: String,
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactInfo {
    pub entries: Vec<ContactEntry>,
    pub socials: Vec<SocialLink>,
    /// "Let's Work Together" bullet points.
    pub availability: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactEntry {
    pub label: String,
    pub value: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialLink {
    pub name: String,
    pub url: String,
}

impl Default for ContactInfo {
    fn default() -> Self {
        let entry = |label: &str, value: &str, href: &str| ContactEntry {
            label: label.into(),
            value: value.into(),
            href: href.into(),
        };
        let social = |name: &str, url: &str| SocialLink {
            name: name.into(),
            url: url.into(),
        };
        Self {
            entries: vec![
                entry(
                    "Email",
                    "john.doe@example.com",
                    "mailto:john.doe@example.com",
                ),
                entry("Phone", "+1 (555) 123-4567", "tel:+15551234567"),
                entry("Location", "San Francisco, CA", "#"),
            ],
            socials: vec![
                social("GitHub", "https://github.com"),
                social("LinkedIn", "https://linkedin.com"),
                social("Twitter", "https://twitter.com"),
                social("Instagram", "https://instagram.com"),
                social("YouTube", "https://youtube.com"),
            ],
            availability: [
                "Available for freelance projects",
                "Quick response time (24-48 hours)",
                "Open to remote collaboration",
                "Flexible with time zones",
            ]
            .iter()
            .map(|s| (*s).into())
            .collect(),
        }
    }
}

impl Default for PortfolioContent {
    fn default() -> Self {
        Self::sample()
    }
}

impl PortfolioContent {
    /// The sample portfolio shown when no config is supplied.
    pub fn sample() -> Self {
        Self {
            owner: Owner::default(),
            intros: SectionIntros::default(),
            about: About::default(),
            skills: sample_skills(),
            highlights: [
                "Clean Code Advocate",
                "Performance Optimizer",
                "Mobile-First Design",
                "Agile Methodology",
            ]
            .iter()
            .map(|s| (*s).into())
            .collect(),
            projects: sample_projects(),
            resume: sample_resume(),
            contact: ContactInfo::default(),
        }
    }

    pub fn featured_projects(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter().filter(|p| p.featured)
    }
}

fn sample_skills() -> Vec<SkillCategory> {
    let category = |title: &str, skills: &[(&str, u8)]| SkillCategory {
        title: title.into(),
        skills: skills
            .iter()
            .map(|(name, level)| Skill {
                name: (*name).into(),
                level: *level,
            })
            .collect(),
    };
    vec![
        category(
            "Frontend",
            &[
                ("React.js", 95),
                ("TypeScript", 90),
                ("Next.js", 85),
                ("Tailwind CSS", 92),
                ("Framer Motion", 88),
                ("Three.js", 75),
            ],
        ),
        category(
            "Backend",
            &[
                ("Node.js", 90),
                ("Express.js", 88),
                ("Python", 82),
                ("PostgreSQL", 85),
                ("MongoDB", 83),
                ("Redis", 78),
            ],
        ),
        category(
            "Tools & Others",
            &[
                ("Git", 95),
                ("Docker", 80),
                ("AWS", 75),
                ("Jest", 85),
                ("Figma", 90),
                ("Webpack", 78),
            ],
        ),
    ]
}

fn sample_projects() -> Vec<Project> {
    let project = |title: &str, description: &str, technologies: &[&str], featured: bool| Project {
        title: title.into(),
        description: description.into(),
        technologies: technologies.iter().map(|t| (*t).into()).collect(),
        github_url: Some("https://github.com".into()),
        live_url: Some("https://demo.com".into()),
        featured,
    };
    vec![
        project(
            "E-Commerce Platform",
            "A full-stack e-commerce solution with React, Node.js, and Stripe integration. \
             Features include real-time inventory, advanced search, and responsive design.",
            &["React", "Node.js", "MongoDB", "Stripe", "Tailwind CSS"],
            true,
        ),
        project(
            "Task Management App",
            "A collaborative task management application with real-time updates, \
             drag-and-drop functionality, and team collaboration features.",
            &["Next.js", "TypeScript", "Prisma", "PostgreSQL", "Socket.io"],
            true,
        ),
        project(
            "Weather Dashboard",
            "An interactive weather dashboard with beautiful visualizations, location-based \
             forecasts, and historical weather data analysis.",
            &["React", "Chart.js", "OpenWeather API", "Material-UI"],
            false,
        ),
        project(
            "Portfolio Website",
            "A stunning 3D portfolio website with interactive animations, particle effects, \
             and smooth page transitions using modern web technologies.",
            &["React", "Three.js", "Framer Motion", "Tailwind CSS"],
            false,
        ),
        project(
            "Social Media Analytics",
            "A comprehensive analytics dashboard for social media performance tracking with \
             real-time data visualization and reporting features.",
            &["Vue.js", "D3.js", "Express.js", "Redis", "Chart.js"],
            false,
        ),
        project(
            "AI Chat Application",
            "An intelligent chat application powered by AI with natural language processing, \
             context awareness, and multi-language support.",
            &["React", "Python", "OpenAI API", "WebSocket", "Docker"],
            false,
        ),
    ]
}

impl Default for Resume {
    fn default() -> Self {
        sample_resume()
    }
}

fn sample_resume() -> Resume {
    let job = |title: &str, company: &str, location: &str, period: &str, items: &[&str]| {
        Experience {
            title: title.into(),
            company: company.into(),
            location: location.into(),
            period: period.into(),
            achievements: items.iter().map(|a| (*a).into()).collect(),
        }
    };
    Resume {
        summary: "Experienced Full Stack Developer with 4+ years of expertise in React, Node.js, \
                  and modern web technologies. Proven track record of delivering high-quality, \
                  scalable applications and leading development teams. Passionate about creating \
                  exceptional user experiences and staying up-to-date with the latest technologies."
            .into(),
        experience: vec![
            job(
                "Senior Frontend Developer",
                "Tech Innovations Inc.",
                "San Francisco, CA",
                "2022 - Present",
                &[
                    "Led development of React-based dashboard serving 10k+ users",
                    "Improved application performance by 40% through optimization",
                    "Mentored 3 junior developers and established coding standards",
                ],
            ),
            job(
                "Full Stack Developer",
                "Digital Solutions Ltd.",
                "New York, NY",
                "2020 - 2022",
                &[
                    "Built and deployed 15+ client websites using React and Node.js",
                    "Implemented CI/CD pipelines reducing deployment time by 60%",
                    "Collaborated with design team to create pixel-perfect UI components",
                ],
            ),
            job(
                "Frontend Developer",
                "StartupXYZ",
                "Austin, TX",
                "2019 - 2020",
                &[
                    "Developed responsive web applications using Vue.js",
                    "Integrated RESTful APIs and managed state with Vuex",
                    "Participated in agile development and sprint planning",
                ],
            ),
        ],
        education: vec![Education {
            degree: "Bachelor of Science in Computer Science".into(),
            school: "University of Technology".into(),
            location: "California".into(),
            period: "2015 - 2019".into(),
            details: "Graduated Magna Cum Laude, GPA: 3.8/4.0".into(),
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_has_every_section() {
        let content = PortfolioContent::sample();
        assert_eq!(content.skills.len(), 3);
        assert_eq!(content.projects.len(), 6);
        assert_eq!(content.featured_projects().count(), 2);
        assert_eq!(content.resume.experience.len(), 3);
        assert_eq!(content.contact.entries.len(), 3);
    }

    #[test]
    fn skill_fraction_is_clamped() {
        let skill = Skill {
            name: "Rust".into(),
            level: 250,
        };
        assert!((skill.fraction() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn content_deserializes_partially() {
        let json = r#"{ "owner": { "name": "Ada" }, "projects": [{ "title": "Engine" }] }"#;
        let content: PortfolioContent = serde_json::from_str(json).unwrap();
        assert_eq!(content.owner.name, "Ada");
        assert_eq!(content.owner.greeting, "Hi, I'm");
        assert_eq!(content.projects[0].title, "Engine");
        assert!(!content.projects[0].featured);
    }
}
