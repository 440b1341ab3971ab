//! Fixture builders shared by unit tests.

use qgroups_shared::{
    Author, AuthorFrontmatter, Guide, GuideFrontmatter, QuestionGroupFrontmatter,
    RawQuestionEntry, SeoFrontmatter, SitemapFrontmatter,
};

pub(crate) fn frontmatter(order: i64) -> QuestionGroupFrontmatter {
    QuestionGroupFrontmatter {
        order,
        brief_title: format!("Group {order}"),
        brief_description: "Brief".into(),
        title: format!("Question Group {order}"),
        description: "Description".into(),
        is_new: false,
        author_id: None,
        date: None,
        seo: SeoFrontmatter {
            title: "SEO title".into(),
            description: "SEO description".into(),
            og_image_url: None,
            keywords: vec![],
        },
        related_title: None,
        related_guides_id: None,
        sitemap: SitemapFrontmatter {
            priority: 0.5,
            changefreq: "monthly".into(),
        },
        questions: vec![],
        ending: None,
    }
}

pub(crate) fn question(text: &str, answer: &str, topics: &[&str]) -> RawQuestionEntry {
    RawQuestionEntry {
        question: text.into(),
        answer: answer.into(),
        topics: topics.iter().map(|t| t.to_string()).collect(),
    }
}

pub(crate) fn author(id: &str, name: &str) -> Author {
    Author {
        id: id.into(),
        frontmatter: AuthorFrontmatter {
            name: name.into(),
            image_url: None,
            title: None,
        },
    }
}

pub(crate) fn guide(id: &str, title: &str) -> Guide {
    Guide {
        id: id.into(),
        frontmatter: GuideFrontmatter {
            title: title.into(),
            description: None,
        },
    }
}
