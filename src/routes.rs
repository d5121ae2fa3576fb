//! 路由注册
//! 创建所有 API 路由并应用中间件

use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;

use crate::{auth::session_middleware, handlers, middleware::AppState};

/// 创建应用路由
pub fn create_router(state: Arc<AppState>) -> Router {
    // 公开端点（健康检查）
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check));

    let auth_routes = Router::new()
        .route("/login", post(handlers::auth::login))
        .merge(
            // 会话校验失败不拒绝请求，身份缺失时 handler 返回 null
            Router::new()
                .route("/validate", get(handlers::auth::validate))
                .route_layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    session_middleware,
                )),
        );

    let resource_routes = Router::new()
        // 兴趣方向
        .route(
            "/interest",
            get(handlers::interest::list_interests).post(handlers::interest::create_interest),
        )
        .route(
            "/interest/{id}",
            get(handlers::interest::get_interest).put(handlers::interest::update_interest),
        )
        // 学生
        .route(
            "/student",
            get(handlers::student::list_students).post(handlers::student::create_student),
        )
        .route(
            "/student/{id}",
            get(handlers::student::get_student)
                .put(handlers::student::update_student)
                .delete(handlers::student::delete_student),
        )
        // 课程
        .route(
            "/subject",
            get(handlers::subject::list_subjects).post(handlers::subject::create_subject),
        )
        .route(
            "/subject/{id}",
            get(handlers::subject::get_subject).put(handlers::subject::update_subject),
        )
        .route(
            "/subject/by-interest/{id}",
            get(handlers::subject::list_subjects_by_interest),
        )
        // 选课
        .route(
            "/subject-joined",
            get(handlers::subject::list_subjects_joined)
                .post(handlers::subject::create_subject_joined),
        )
        .route(
            "/subject-joined/by-student/{id}",
            get(handlers::subject::list_subjects_joined_by_student),
        )
        .route(
            "/subject-joined/by-subject/{id}",
            get(handlers::subject::list_subjects_joined_by_subject),
        )
        // 分级测试
        .route(
            "/placement-test",
            get(handlers::placement::list_placement_tests)
                .post(handlers::placement::create_placement_test),
        )
        .route(
            "/placement-test/{id}",
            put(handlers::placement::update_placement_test),
        )
        .route(
            "/placement-test-answer",
            get(handlers::placement::list_placement_test_answers)
                .post(handlers::placement::create_placement_test_answer),
        )
        .route(
            "/placement-test-answer/by-student/{id}",
            get(handlers::placement::list_placement_test_answers_by_student),
        )
        .route(
            "/placement-test-answer/by-placement-test/{id}",
            get(handlers::placement::list_placement_test_answers_by_placement_test),
        )
        .route(
            "/placement-test-answer/{id}",
            put(handlers::placement::update_placement_test_answer),
        )
        .route(
            "/placement-test-result",
            get(handlers::placement::list_placement_test_results)
                .post(handlers::placement::create_placement_test_result),
        )
        .route(
            "/placement-test-result/by-student/{id}",
            get(handlers::placement::list_placement_test_results_by_student),
        )
        .route(
            "/placement-test-result/by-interest/{id}",
            get(handlers::placement::list_placement_test_results_by_interest),
        )
        // 测验
        .route(
            "/quiz",
            get(handlers::quiz::list_quizzes).post(handlers::quiz::create_quiz),
        )
        .route(
            "/quiz/{id}",
            get(handlers::quiz::get_quiz).put(handlers::quiz::update_quiz),
        )
        .route(
            "/quiz/by-subject/{id}",
            get(handlers::quiz::list_quizzes_by_subject),
        )
        .route(
            "/quiz-answer",
            get(handlers::quiz::list_quiz_answers).post(handlers::quiz::create_quiz_answer),
        )
        .route(
            "/quiz-answer/by-student/{id}",
            get(handlers::quiz::list_quiz_answers_by_student),
        )
        .route(
            "/quiz-answer/by-quiz/{id}",
            get(handlers::quiz::list_quiz_answers_by_quiz),
        )
        .route(
            "/quiz-result",
            get(handlers::quiz::list_quiz_results).post(handlers::quiz::create_quiz_result),
        )
        .route(
            "/quiz-result/by-student/{id}",
            get(handlers::quiz::list_quiz_results_by_student),
        )
        .route(
            "/quiz-result/by-subject/{id}",
            get(handlers::quiz::list_quiz_results_by_subject),
        )
        // 学习资料
        .route(
            "/learning-material",
            get(handlers::material::list_learning_materials)
                .post(handlers::material::create_learning_material),
        )
        .route(
            "/learning-material/{id}",
            get(handlers::material::get_learning_material)
                .put(handlers::material::update_learning_material)
                .delete(handlers::material::delete_learning_material),
        )
        .route(
            "/learning-material/by-subject/{id}",
            get(handlers::material::list_learning_materials_by_subject),
        )
        // 附件
        .route(
            "/attachment",
            get(handlers::material::list_attachments).post(handlers::material::create_attachment),
        )
        .route(
            "/attachment/by-learning-material/{id}",
            get(handlers::material::list_attachments_by_learning_material),
        )
        .route(
            "/attachment/{id}",
            put(handlers::material::update_attachment),
        );

    let max_body_bytes = state.config.server.max_body_bytes;

    Router::new()
        .merge(public_routes)
        .merge(auth_routes)
        .merge(resource_routes)
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(
                    crate::middleware::request_tracking_middleware,
                ))
                .layer(RequestBodyLimitLayer::new(max_body_bytes)),
        )
        .with_state(state)
}
