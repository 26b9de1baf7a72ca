use std::sync::Arc;
use chrono::Utc;
use crate::domain::models::comment::{Comment, CommentView};
use crate::domain::models::post::{
    Pagination, Post, PostDetail, PostListQuery, PostPage, PostSort,
};
use crate::domain::ports::{CommentRepository, PostRepository};
use crate::domain::services::authz::{can_set_notice, Authorizer};
use crate::error::AppError;
use tracing::info;

const MAX_PAGE_SIZE: i64 = 50;
const DEFAULT_PAGE_SIZE: i64 = 10;

pub struct CreatePostInput {
    pub title: String,
    pub content: String,
    pub visibility: String,
    pub is_notice: bool,
}

#[derive(Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub visibility: Option<String>,
    pub is_notice: Option<bool>,
}

pub struct ListPostsInput {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub sort: PostSort,
    pub query: Option<String>,
    pub only_notice: bool,
}

pub struct PostService {
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
    authorizer: Arc<Authorizer>,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        comments: Arc<dyn CommentRepository>,
        authorizer: Arc<Authorizer>,
    ) -> Self {
        Self { posts, comments, authorizer }
    }

    /// Paginated board listing. Page floors to 1 and page size clamps to
    /// [1, 50]; notices sort ahead of everything unless the listing is
    /// already restricted to notices.
    pub async fn list_by_club(
        &self,
        club_id: &str,
        user_id: &str,
        input: ListPostsInput,
    ) -> Result<PostPage, AppError> {
        self.authorizer.require_approved_member(user_id, club_id).await?;

        let page = input.page.unwrap_or(1).max(1);
        let page_size = input.page_size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        let query = input.query
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty());

        let normalized = PostListQuery {
            page,
            page_size,
            sort: input.sort,
            query,
            only_notice: input.only_notice,
        };

        let (items, total_count) = self.posts.list_page(club_id, &normalized).await?;
        let total_pages = (total_count + page_size - 1) / page_size;

        Ok(PostPage {
            items,
            pagination: Pagination {
                total_count,
                total_pages,
                page,
                page_size,
            },
        })
    }

    /// Detail fetch with a non-idempotent side effect: every call bumps the
    /// view counter by exactly one, with no de-duplication by viewer.
    pub async fn get_post(&self, post_id: &str, user_id: &str) -> Result<PostDetail, AppError> {
        let post = self.posts.find_by_id(post_id).await?
            .ok_or(AppError::NotFound("Post not found".into()))?;

        self.authorizer.require_approved_member(user_id, &post.club_id).await?;

        self.posts.increment_view_and_fetch(post_id).await?
            .ok_or(AppError::NotFound("Post not found".into()))
    }

    /// The author's tier is snapshotted into the post at creation time.
    pub async fn create_post(
        &self,
        club_id: &str,
        user_id: &str,
        input: CreatePostInput,
    ) -> Result<Post, AppError> {
        let membership = self.authorizer.require_approved_member(user_id, club_id).await?;

        if input.is_notice && !can_set_notice(&membership.role, &membership.tier) {
            return Err(AppError::Forbidden("No permission to pin this post as a notice".into()));
        }

        let post = Post::new(
            club_id.to_string(),
            user_id.to_string(),
            input.title,
            input.content,
            input.visibility,
            membership.tier.clone(),
            input.is_notice,
        );
        let created = self.posts.create(&post).await?;

        info!("Post created: {} in club {}", created.id, club_id);
        Ok(created)
    }

    /// Edits are restricted to the author or a club leader, the same policy
    /// as deletion. Flipping the notice flag additionally requires notice
    /// permission on the editor's current membership.
    pub async fn update_post(
        &self,
        post_id: &str,
        user_id: &str,
        club_id: &str,
        patch: PostPatch,
    ) -> Result<Post, AppError> {
        let membership = self.authorizer.require_approved_member(user_id, club_id).await?;

        let mut post = match self.posts.find_by_id(post_id).await? {
            Some(p) if p.club_id == club_id => p,
            _ => return Err(AppError::NotFound("Post not found".into())),
        };

        if post.user_id != user_id && !membership.is_leader() {
            return Err(AppError::Forbidden("Only the author or the club leader can edit this post".into()));
        }

        if let Some(wanted) = patch.is_notice {
            if wanted != post.is_notice && !can_set_notice(&membership.role, &membership.tier) {
                return Err(AppError::Forbidden("No permission to change the notice flag".into()));
            }
        }

        if let Some(title) = patch.title {
            post.title = title;
        }
        if let Some(content) = patch.content {
            post.content = content;
        }
        if let Some(visibility) = patch.visibility {
            post.visibility = visibility;
        }
        if let Some(is_notice) = patch.is_notice {
            post.is_notice = is_notice;
        }
        post.updated_at = Utc::now();

        let updated = self.posts.update(&post).await?;
        info!("Post updated: {}", post_id);
        Ok(updated)
    }

    pub async fn delete_post(&self, post_id: &str, club_id: &str, user_id: &str) -> Result<(), AppError> {
        let membership = self.authorizer.require_approved_member(user_id, club_id).await?;

        let post = match self.posts.find_by_id(post_id).await? {
            Some(p) if p.club_id == club_id => p,
            _ => return Err(AppError::NotFound("Post not found".into())),
        };

        if post.user_id != user_id && !membership.is_leader() {
            return Err(AppError::Forbidden("Only the author or the club leader can delete this post".into()));
        }

        self.posts.delete(post_id).await?;
        info!("Post deleted: {}", post_id);
        Ok(())
    }

    pub async fn list_comments(&self, post_id: &str, user_id: &str) -> Result<Vec<CommentView>, AppError> {
        let post = self.posts.find_by_id(post_id).await?
            .ok_or(AppError::NotFound("Post not found".into()))?;

        self.authorizer.require_approved_member(user_id, &post.club_id).await?;

        self.comments.list_by_post(post_id).await
    }

    pub async fn create_comment(
        &self,
        post_id: &str,
        user_id: &str,
        content: String,
    ) -> Result<CommentView, AppError> {
        let post = self.posts.find_by_id(post_id).await?
            .ok_or(AppError::NotFound("Post not found".into()))?;

        self.authorizer.require_approved_member(user_id, &post.club_id).await?;

        let comment = Comment::new(post_id.to_string(), user_id.to_string(), content);
        let created = self.comments.create(&comment).await?;

        info!("Comment created on post {}", post_id);
        Ok(created)
    }
}
